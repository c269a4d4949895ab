use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use lumen::cli::CliArgs;
use lumen::config::ViewerConfig;
use lumen::geometry::Size;
use lumen::messages::ViewerMsg;
use lumen::model::ViewerModel;
use lumen::theme::{load_theme, ViewerTheme};

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args.into_config().map_err(|e| anyhow::anyhow!(e))?;

    lumen::tracing::init();

    let mut config = ViewerConfig::load();
    startup.apply(&mut config);

    let theme = load_theme(&config.theme).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using default", config.theme, e);
        ViewerTheme::default()
    });

    // The real size arrives with the first resize once the window exists
    let model = ViewerModel::new(config, theme, Size::default());

    let event_loop = EventLoop::<ViewerMsg>::with_user_event().build()?;
    let mut app = App::new(model, startup.initial_image(), event_loop.create_proxy());

    event_loop.run_app(&mut app)?;

    Ok(())
}
