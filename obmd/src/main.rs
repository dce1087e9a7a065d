use std::{
  fs,
  io::{self, Write},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use obmd::{
  cli::{Cli, Commands},
  config::Config,
  render,
};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!(
          "Failed to generate configuration file: {}",
          output.display()
        )
      })?;
    },

    Commands::Render {
      input,
      output,
      format,
      wrap_class,
    } => {
      let mut config = Config::load(&cli.config_files, &cli.config_overrides)
        .wrap_err("Failed to load configuration")?;
      if let Some(wrap_class) = wrap_class {
        config.wrap_class.clone_from(wrap_class);
      }

      let post = render::render_note(&config, input)
        .wrap_err_with(|| format!("Failed to render {}", input.display()))?;
      let rendered = post
        .to_output(format)
        .wrap_err("Failed to serialize rendered note")?;

      if let Some(output) = output {
        fs::write(output, &rendered).wrap_err_with(|| {
          format!("Failed to write output: {}", output.display())
        })?;
        info!("Rendered {} to {}", input.display(), output.display());
      } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")
          .wrap_err("Failed to write to stdout")?;
      }
    },
  }

  Ok(())
}
