use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once in `main` and handed to each component by construction —
/// nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mistral API key. May be empty — startup logs a warning instead of
    /// failing, and the provider rejects unauthenticated calls at request time.
    pub mistral_api_key: String,
    pub mistral_chat_url: String,
    pub mistral_ocr_url: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub cloudinary_upload_base: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_CHAT_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_OCR_URL: &str = "https://api.mistral.ai/v1/ocr";
const DEFAULT_UPLOAD_BASE: &str = "https://api.cloudinary.com/v1_1";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            mistral_api_key: env_or("MISTRAL_API_KEY", ""),
            mistral_chat_url: env_or("MISTRAL_CHAT_URL", DEFAULT_CHAT_URL),
            mistral_ocr_url: env_or("MISTRAL_OCR_URL", DEFAULT_OCR_URL),
            cloudinary_cloud_name: env_or("CLOUDINARY_CLOUD_NAME", ""),
            cloudinary_api_key: env_or("CLOUDINARY_API_KEY", ""),
            cloudinary_api_secret: env_or("CLOUDINARY_API_SECRET_KEY", ""),
            cloudinary_upload_base: env_or("CLOUDINARY_UPLOAD_BASE", DEFAULT_UPLOAD_BASE),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
