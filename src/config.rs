// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Push delivery (FCM legacy HTTP API)
    pub fcm_server_key: String,
    pub fcm_api_url: String,
    // Local media storage
    pub upload_dir: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");

        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());

        // An empty server key disables push delivery entirely.
        let fcm_server_key = std::env::var("FCM_SERVER_KEY").unwrap_or_else(|_| "".to_string());
        let fcm_api_url = std::env::var("FCM_API_URL")
            .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".to_string());

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Config {
            database_url,
            app_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port: port.parse::<u16>().unwrap(),
            fcm_server_key,
            fcm_api_url,
            upload_dir,
        }
    }
}
