/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// admin credentials and upstream secrets, which must be set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Flat delivery charge added on top of the cart total.
    pub delivery_charge: u32,
    pub admin: AdminConfig,
    pub payment: PaymentConfig,
}

/// The single shared admin credential.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub key_id: String,
    pub key_secret: String,
    /// ISO currency code passed to the payment provider (default: `INR`).
    pub currency: String,
}

/// Upstream credentials consumed only by `main.rs` when constructing the
/// real stores; tests never need these.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Spreadsheet id holding the product, link, and order tables.
    pub spreadsheet_id: String,
    /// Service-account key file contents (JSON).
    pub service_account_json: String,
    /// Blob store write token.
    pub blob_token: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `DELIVERY_CHARGE`      | `50`                    |
    /// | `ADMIN_USERNAME`       | (required)              |
    /// | `ADMIN_PASSWORD`       | (required)              |
    /// | `RAZORPAY_KEY_ID`      | (required)              |
    /// | `RAZORPAY_KEY_SECRET`  | (required)              |
    /// | `PAYMENT_CURRENCY`     | `INR`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let delivery_charge: u32 = std::env::var("DELIVERY_CHARGE")
            .unwrap_or_else(|_| linkout_core::money::DEFAULT_DELIVERY_CHARGE.to_string())
            .parse()
            .expect("DELIVERY_CHARGE must be a valid u32");

        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set"),
            password: std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
        };

        let payment = PaymentConfig {
            key_id: std::env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set"),
            key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .expect("RAZORPAY_KEY_SECRET must be set"),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            delivery_charge,
            admin,
            payment,
        }
    }
}

impl UpstreamConfig {
    /// | Env Var                  | Default    |
    /// |--------------------------|------------|
    /// | `SPREADSHEET_ID`         | (required) |
    /// | `SERVICE_ACCOUNT_JSON`   | (required) |
    /// | `BLOB_READ_WRITE_TOKEN`  | (required) |
    pub fn from_env() -> Self {
        Self {
            spreadsheet_id: std::env::var("SPREADSHEET_ID").expect("SPREADSHEET_ID must be set"),
            service_account_json: std::env::var("SERVICE_ACCOUNT_JSON")
                .expect("SERVICE_ACCOUNT_JSON must be set"),
            blob_token: std::env::var("BLOB_READ_WRITE_TOKEN")
                .expect("BLOB_READ_WRITE_TOKEN must be set"),
        }
    }
}
