#[derive(Clone)]
pub struct AppConfig {
    pub wp_site_url: String,
    pub wc_consumer_key: String,
    pub wc_consumer_secret: String,
    pub payload_url: String,
    pub payload_email: String,
    pub payload_password: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub product_page_size: u32,
    pub category_delay_ms: u64,
    pub attribute_delay_ms: u64,
    pub product_delay_ms: u64,
    pub image_download_timeout_secs: u64,
    pub image_upload_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("wp_site_url", &self.wp_site_url)
            .field("wc_consumer_key", &"[redacted]")
            .field("wc_consumer_secret", &"[redacted]")
            .field("payload_url", &self.payload_url)
            .field("payload_email", &self.payload_email)
            .field("payload_password", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("product_page_size", &self.product_page_size)
            .field("category_delay_ms", &self.category_delay_ms)
            .field("attribute_delay_ms", &self.attribute_delay_ms)
            .field("product_delay_ms", &self.product_delay_ms)
            .field(
                "image_download_timeout_secs",
                &self.image_download_timeout_secs,
            )
            .field("image_upload_timeout_secs", &self.image_upload_timeout_secs)
            .finish()
    }
}
