// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{DigestError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub digest: DigestConfig,
    pub summarizer: SummarizerConfig,
    pub store: StoreConfig,
    pub mail: MailConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Selection policy for one topic. The fallback numbers are a fixed
/// heuristic inherited from the production job; they are surfaced here as
/// named fields rather than inferred further.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DigestConfig {
    pub papers_per_topic: usize,
    pub min_primary_results: usize,
    pub primary_days_back: i64,
    pub primary_max_results: usize,
    pub fallback_days_back: i64,
    pub fallback_max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizerConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub min_length: usize,
    pub max_length: usize,
    pub fallback_chars: usize,
    pub delay_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Github,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub supabase: SupabaseConfig,
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub table: String,
    pub roster_table: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MailBackend {
    Smtp,
    Resend,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub backend: MailBackend,
    pub sender: String,
    pub subject: String,
    pub smtp: SmtpConfig,
    pub resend: ResendConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResendConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

/// Local daily window in which the job is allowed to send; guards against a
/// misconfigured external scheduler.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    pub send_hour: u32,
    pub send_minute: u32,
    pub window_minutes: u32,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PAPER_DIGEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| DigestError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| DigestError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                base_url: "http://export.arxiv.org/api/query".to_string(),
                timeout_secs: 30,
            },
            digest: DigestConfig {
                papers_per_topic: 5,
                min_primary_results: 5,
                primary_days_back: 1,
                primary_max_results: 50,
                fallback_days_back: 7,
                fallback_max_results: 200,
            },
            summarizer: SummarizerConfig {
                api_url: "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
                    .to_string(),
                api_token: None,
                min_length: 25,
                max_length: 70,
                fallback_chars: 200,
                delay_ms: 100,
                timeout_secs: 60,
            },
            store: StoreConfig {
                backend: StoreBackend::Supabase,
                supabase: SupabaseConfig {
                    url: "https://project.supabase.co".to_string(),
                    api_key: None,
                    table: "subscribers".to_string(),
                    roster_table: "all_subscribers".to_string(),
                },
                github: GitHubConfig {
                    owner: "user".to_string(),
                    repo: "digest-data".to_string(),
                    path: "subscribers.json".to_string(),
                    token: None,
                },
            },
            mail: MailConfig {
                backend: MailBackend::Smtp,
                sender: "digest@example.com".to_string(),
                subject: "📢 Your Daily Research Digest".to_string(),
                smtp: SmtpConfig {
                    host: "smtp.gmail.com".to_string(),
                    port: 587,
                    username: None,
                    password: None,
                },
                resend: ResendConfig {
                    api_url: "https://api.resend.com/emails".to_string(),
                    api_key: None,
                },
            },
            schedule: ScheduleConfig {
                send_hour: 8,
                send_minute: 0,
                window_minutes: 15,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.digest.papers_per_topic == 0 {
            return Err(DigestError::Config(
                "papers_per_topic must be greater than 0".to_string(),
            ));
        }

        if self.digest.primary_days_back < 1 || self.digest.fallback_days_back < 1 {
            return Err(DigestError::Config(
                "days_back values must be positive".to_string(),
            ));
        }

        if self.digest.primary_max_results == 0 || self.digest.fallback_max_results == 0 {
            return Err(DigestError::Config(
                "max_results values must be greater than 0".to_string(),
            ));
        }

        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(DigestError::Config(
                "summarizer min_length exceeds max_length".to_string(),
            ));
        }

        if self.schedule.send_hour > 23 || self.schedule.send_minute > 59 {
            return Err(DigestError::Config(
                "schedule send time out of range".to_string(),
            ));
        }

        if self.schedule.window_minutes == 0 {
            return Err(DigestError::Config(
                "schedule window_minutes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
