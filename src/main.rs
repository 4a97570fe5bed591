use bangumi_renamer::api::{config_from_env, BangumiClient, MetadataSource};
use bangumi_renamer::cli::Args;
use bangumi_renamer::config::{resolve_access_token, ConfigLocation, ConfigStore};
use bangumi_renamer::error::AppError;
use bangumi_renamer::logging;
use bangumi_renamer::shell::{Prompter, Shell, ShellError, ShellOptions};
use bangumi_renamer::ui::{Ui, UiConfig};
use clap::Parser;
use std::io;
use tracing::{debug, error, warn};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let location = match &args.config {
        Some(path) => ConfigLocation::at(path),
        None => ConfigLocation::default_location(),
    };
    debug!("Using config at {:?}", location.path);
    let mut store = ConfigStore::load(location);

    let mut ui = Ui::new(UiConfig::new(args.verbose > 0));
    ui.print_header(env!("CARGO_PKG_VERSION"));

    let options = ShellOptions {
        dry_run: args.dry,
        offline: args.no_metadata,
    };

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut shell = Shell::new(prompter, ui, &mut store, options);

    match shell.ensure_access_token() {
        Ok(()) => {}
        Err(ShellError::InputClosed) => debug!("Input closed at token prompt"),
        Err(e) => return Err(e.into()),
    }

    let client = if args.no_metadata {
        None
    } else {
        let api_config = config_from_env(resolve_access_token(shell.store()));
        match BangumiClient::new(api_config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Bangumi client unavailable, continuing without metadata: {}", e);
                None
            }
        }
    };

    let source = client.as_ref().map(|c| c as &dyn MetadataSource);
    shell.run(source, args.target_dir.as_deref())?;

    Ok(())
}
