use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Which backend holds the `reports` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is `Postgres`
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Transport security used when talking to the SMTP relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS
    StartTls,
    /// Implicit TLS (usually port 465)
    Tls,
    /// Unencrypted, for local relays and test catchers only
    None,
}

/// SMTP relay settings and the fixed safety-team recipient
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub security: SmtpSecurity,
    pub from: String,
    pub safety_recipient: String,
    pub subject_prefix: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            mail: MailConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreBackend {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "REPORT_STORE must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let backend = StoreBackend::parse(
            &env::var("REPORT_STORE").unwrap_or_else(|_| "postgres".to_string()),
        )?;

        let url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if backend == StoreBackend::Postgres && url.is_none() {
            return Err("DATABASE_URL must be set".to_string());
        }

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            backend,
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SmtpSecurity {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" | "ssl" => Ok(Self::Tls),
            "none" | "plain" => Ok(Self::None),
            other => Err(format!(
                "SMTP_SECURITY must be 'starttls', 'tls' or 'none', got '{}'",
                other
            )),
        }
    }
}

impl MailConfig {
    const DEFAULT_SMTP_PORT: u16 = 587;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_FROM: &'static str = "no-reply@siderperu.com.pe";
    const DEFAULT_SAFETY_RECIPIENT: &'static str = "seguridad@siderperu.com.pe";
    const DEFAULT_SUBJECT_PREFIX: &'static str = "Reporte de Incidentes SIDERPERU";

    pub fn from_env() -> Result<Self, String> {
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid port number".to_string())?;

        // Credentials are only used when both halves are present
        let smtp_username = env::var("SMTP_USERNAME").ok().filter(|s| !s.is_empty());
        let smtp_password = env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty());

        let security =
            SmtpSecurity::parse(&env::var("SMTP_SECURITY").unwrap_or_else(|_| "starttls".into()))?;

        let from = env::var("MAIL_FROM").unwrap_or_else(|_| Self::DEFAULT_FROM.to_string());

        let safety_recipient = env::var("SAFETY_EMAIL")
            .unwrap_or_else(|_| Self::DEFAULT_SAFETY_RECIPIENT.to_string());

        let subject_prefix = env::var("MAIL_SUBJECT_PREFIX")
            .unwrap_or_else(|_| Self::DEFAULT_SUBJECT_PREFIX.to_string());

        let timeout_secs = env::var("MAIL_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MAIL_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            security,
            from,
            safety_recipient,
            subject_prefix,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Returns the SMTP credentials if both username and password are configured
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_username, &self.smtp_password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "SIDERPERU Incidents API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "API para gestión de incidentes de seguridad de SIDERPERU".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
