// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // AES key material for the password manager
    pub password_secret: String,
    // Where ticket attachment files land on disk
    pub upload_dir: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let password_secret =
            std::env::var("PASSWORD_SECRET_KEY").expect("PASSWORD_SECRET_KEY must be set");

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "wwwroot/uploads".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());

        Config {
            database_url,
            frontend_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port: port.parse::<u16>().unwrap(),
            password_secret,
            upload_dir,
        }
    }
}
