mod service;

pub use service::{SettingsService, API_URL_ENV, CONFIG_FILE_NAME};
