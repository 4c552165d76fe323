use wormhole::options::Options;
use wormhole::Viewer;

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder();

    // Optional argument: path to an options preset TOML.
    if let Some(arg) = std::env::args().nth(1) {
        match Options::load(std::path::Path::new(&arg)) {
            Ok(options) => {
                log::info!("loaded options preset from {arg}");
                builder = builder.with_options(options);
            }
            Err(e) => {
                log::error!("failed to load preset {arg}: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
