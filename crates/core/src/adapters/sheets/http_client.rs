use google_sheets4::hyper;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<HttpsConnector>;

/// Shared by the authenticator and the Sheets hub. Trusts the bundled Mozilla
/// roots, so it works in images without a system CA store. Plain `http` is
/// accepted because the token and API endpoints come from the key and config.
pub fn http_client() -> HttpClient {
    hyper::Client::builder().build(
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build(),
    )
}
