use skyboard_core::config::{ConfigLoader, default_config_path};
use std::path::Path;
use tracing::debug;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load_or_default(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            debug!(profile = %rc.active_profile, "configuration loaded");

            println!("OK   skb doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!(
                "source: {}",
                rc.source
                    .as_ref()
                    .map_or_else(|| "(built-in defaults)".to_string(), |p| p.display().to_string())
            );
            println!("profile: {}", rc.active_profile);
            println!("timezone: {}", rc.timezone.name());
            println!("week_start: {}", rc.resolver.week_start);
            println!("daily_auto: {}", rc.resolver.daily_auto);
            println!("logging.level: {}", rc.logging.level);
            println!(
                "logging.file: {}",
                rc.logging
                    .file
                    .as_ref()
                    .map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
            );
        }
        Err(e) => {
            println!("FAIL skb doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
