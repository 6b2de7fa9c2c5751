use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub server_bind_point: String,
    pub port: u16,
    pub log_level: String,
    /// Application public key from the Discord developer portal, hex-encoded.
    pub application_public_key: String,
    pub google_maps_api_key: String,
    /// Budget for a single geocoding call. Has to leave headroom inside
    /// Discord's 3-second interaction reply window.
    pub resolver_timeout_secs: u64,
    /// Whether check-in confirmations include raw coordinates or only the
    /// place name.
    pub show_coordinates: bool,
    /// Known location tokens mapped to the place query sent to the geocoder.
    pub locations: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        let mut locations = HashMap::new();
        locations.insert(
            "central-park".to_string(),
            "Central Park, New York, NY".to_string(),
        );

        Configuration {
            server_bind_point: "0.0.0.0".into(),
            port: 80,
            log_level: "DEBUG".into(),
            application_public_key: String::new(),
            google_maps_api_key: String::new(),
            resolver_timeout_secs: 2,
            show_coordinates: true,
            locations,
        }
    }

    pub fn load_from_config_file() -> anyhow::Result<Self> {
        let config_directory_path = std::env::var("CONFIG_DIRECTORY")?;
        let config_directory = std::path::Path::new(&config_directory_path);
        if !config_directory.exists() {
            std::fs::create_dir_all(&config_directory_path)?;
        }

        let config_file_name = std::env::var("CONFIG_FILE_NAME")?;
        let configuration_path = config_directory.join(&config_file_name);
        let mut config = if !configuration_path.exists() {
            let new_config = Configuration::new();
            let serialized = toml::to_string_pretty(&new_config)?;
            std::fs::write(configuration_path, serialized)?;
            new_config
        } else {
            let raw_config = std::fs::read_to_string(configuration_path)?;
            toml::from_str::<Configuration>(&raw_config)?
        };

        // Secrets supplied by the deployment win over whatever the file has.
        if let Ok(public_key) = std::env::var("APPLICATION_PUBLIC_KEY") {
            config.application_public_key = public_key;
        }

        if let Ok(api_key) = std::env::var("GOOGLE_MAPS_API_KEY") {
            config.google_maps_api_key = api_key;
        }

        Ok(config)
    }
}
