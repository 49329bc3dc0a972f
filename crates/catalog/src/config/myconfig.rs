use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub metric_port: u16,
    pub kafka_broker: String,
    pub kafka_group_id: String,
    pub rpc_topic_prefix: String,
    pub otel_endpoint: String,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("Missing environment variable: {key}"))
        };

        let database_url = required("DATABASE_URL")?;
        let kafka_broker = required("KAFKA")?;
        let run_migrations_str = required("RUN_MIGRATIONS")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let metric_port = required("METRIC_PORT")?
            .parse::<u16>()
            .context("METRIC_PORT must be a valid u16 integer")?;

        let db_max_conn: u32 = lookup("DB_MAX_CONNECTION")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let db_min_conn: u32 = lookup("DB_MIN_CONNECTION")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({db_min_conn}) cannot exceed DB_MAX_CONNECTION ({db_max_conn})"
            ));
        }

        let kafka_group_id =
            lookup("KAFKA_GROUP_ID").unwrap_or_else(|| "catalog-service-group".to_string());
        let rpc_topic_prefix = lookup("RPC_TOPIC_PREFIX").unwrap_or_default();
        let otel_endpoint =
            lookup("OTEL_ENDPOINT").unwrap_or_else(|| "http://otel-collector:4317".to_string());

        Ok(Self {
            database_url,
            run_migrations,
            metric_port,
            kafka_broker,
            kafka_group_id,
            rpc_topic_prefix,
            otel_endpoint,
            db_max_conn,
            db_min_conn,
        })
    }
}
