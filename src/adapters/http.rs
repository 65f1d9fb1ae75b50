use crate::domain::model::{Brand, Product, ProductRef, Session};
use crate::domain::ports::{Catalog, ConfigProvider};
use crate::utils::error::{CorrectorError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

/// Upper bound on brand listing pages, in case `count` is missing or wrong.
pub const MAX_PAGES: u32 = 500;

/// Open Food Facts catalog over its JSON web API.
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrandPage {
    #[serde(default)]
    count: Option<serde_json::Value>,
    #[serde(default)]
    products: Vec<ProductRef>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<ProductFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductFields {
    code: Option<String>,
    product_name: Option<String>,
    brands: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    status_verbose: Option<String>,
}

impl OpenFoodFactsClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn product_api_url(&self, code: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, code)
    }

    pub fn product_web_url(&self, code: &str) -> String {
        format!("{}/product/{}", self.base_url, code)
    }

    fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CorrectorError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

/// Listing pages report `count` as a number or as a numeric string.
fn parse_count(value: &serde_json::Value) -> Option<usize> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl Catalog for OpenFoodFactsClient {
    async fn login(&self, username: &str, password: &str) -> Result<Option<Session>> {
        let url = format!("{}/cgi/session.pl", self.base_url);
        tracing::debug!("Logging in as {} via {}", username, url);

        let response = self
            .client
            .post(&url)
            .form(&[("jqm", "1"), ("user_id", username), ("password", password)])
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let body = Self::ensure_success(response)?.text().await?;

        // A rejected login answers with an HTML page or a JSON body without user_id.
        let session = serde_json::from_str::<LoginResponse>(&body)
            .ok()
            .and_then(|r| r.user_id)
            .filter(|user_id| !user_id.is_empty())
            .map(|user_id| Session {
                user_id,
                password: password.to_string(),
            });

        Ok(session)
    }

    async fn brand_products(&self, brand: &Brand) -> Result<Vec<ProductRef>> {
        let mut products = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!("{}/{}.json", brand.url.trim_end_matches('/'), page);
            tracing::debug!("Fetching brand page: {}", url);

            let response = self.client.get(&url).send().await?;
            let listing: BrandPage = Self::ensure_success(response)?.json().await?;

            if listing.products.is_empty() {
                break;
            }
            products.extend(listing.products);

            match listing.count.as_ref().and_then(parse_count) {
                Some(count) if products.len() >= count => break,
                _ => {}
            }
            if page == MAX_PAGES {
                tracing::warn!(
                    "Stopped listing brand {} after {} pages",
                    brand.name,
                    MAX_PAGES
                );
            }
        }

        tracing::debug!("Brand {} lists {} product(s)", brand.name, products.len());
        Ok(products)
    }

    async fn get_product(&self, code: &str) -> Result<Option<Product>> {
        let url = self.product_api_url(code);
        tracing::debug!("Fetching product: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: ProductEnvelope = Self::ensure_success(response)?.json().await?;

        if envelope.status != 1 {
            return Ok(None);
        }
        let fields = envelope.product.unwrap_or_default();
        let code = fields.code.unwrap_or_else(|| code.to_string());

        Ok(Some(Product {
            weburl: self.product_web_url(&code),
            url,
            code,
            product_name: fields.product_name.unwrap_or_default(),
            brands: fields.brands.unwrap_or_default(),
        }))
    }

    async fn update_product(&self, product: &Product, session: &Session) -> Result<bool> {
        let url = format!("{}/cgi/product_jqm2.pl", self.base_url);
        tracing::debug!("Updating product {} via {}", product.code, url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("code", product.code.as_str()),
                ("user_id", session.user_id.as_str()),
                ("password", session.password.as_str()),
                ("brands", product.brands.as_str()),
            ])
            .send()
            .await?;

        let result: UpdateResponse = Self::ensure_success(response)?.json().await?;
        tracing::debug!(
            "Update of {} answered status {} ({})",
            product.code,
            result.status,
            result.status_verbose.as_deref().unwrap_or("-")
        );

        Ok(result.status == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> OpenFoodFactsClient {
        let config = ServiceConfig::default().with_base_url(server.base_url());
        OpenFoodFactsClient::new(&config).unwrap()
    }

    fn brand(server: &MockServer, slug: &str) -> Brand {
        Brand {
            name: slug.to_string(),
            url: format!("{}/brand/{}", server.base_url(), slug),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start();
        let login_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/cgi/session.pl")
                .x_www_form_urlencoded_tuple("user_id", "bot")
                .x_www_form_urlencoded_tuple("password", "secret")
                .x_www_form_urlencoded_tuple("jqm", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"user_id": "bot", "name": "Bot"}));
        });

        let session = client_for(&server).login("bot", "secret").await.unwrap();

        login_mock.assert();
        let session = session.unwrap();
        assert_eq!(session.user_id, "bot");
        assert_eq!(session.password, "secret");
    }

    #[tokio::test]
    async fn test_login_rejected_with_html() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/cgi/session.pl");
            then.status(200).body("<html>Incorrect user name or password.</html>");
        });

        let session = client_for(&server).login("bot", "wrong").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_login_rejected_with_forbidden() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/cgi/session.pl");
            then.status(403);
        });

        let session = client_for(&server).login("bot", "wrong").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_login_server_error_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/cgi/session.pl");
            then.status(500);
        });

        let result = client_for(&server).login("bot", "secret").await;
        assert!(matches!(
            result,
            Err(CorrectorError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_brand_products_follows_pages_until_count() {
        let server = MockServer::start();
        let page1 = server.mock(|when, then| {
            when.method(GET).path("/brand/kinder/1.json");
            then.status(200).json_body(serde_json::json!({
                "count": 3,
                "page": 1,
                "products": [{"code": "1"}, {"code": "2"}]
            }));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET).path("/brand/kinder/2.json");
            then.status(200).json_body(serde_json::json!({
                "count": "3",
                "page": "2",
                "products": [{"code": "3"}]
            }));
        });

        let products = client_for(&server)
            .brand_products(&brand(&server, "kinder"))
            .await
            .unwrap();

        page1.assert();
        page2.assert();
        let codes: Vec<&str> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_brand_products_stops_on_empty_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/brand/ferrero/1.json");
            then.status(200).json_body(serde_json::json!({
                "products": [{"code": "10"}]
            }));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET).path("/brand/ferrero/2.json");
            then.status(200)
                .json_body(serde_json::json!({"count": 0, "products": []}));
        });

        let products = client_for(&server)
            .brand_products(&brand(&server, "ferrero"))
            .await
            .unwrap();

        page2.assert();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_brand_products_unknown_brand_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/brand/nobody/1.json");
            then.status(200)
                .json_body(serde_json::json!({"count": 0, "products": []}));
        });

        let products = client_for(&server)
            .brand_products(&brand(&server, "nobody"))
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_get_product() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v0/product/3017620422003.json");
            then.status(200).json_body(serde_json::json!({
                "status": 1,
                "code": "3017620422003",
                "product": {
                    "code": "3017620422003",
                    "product_name": "Kinder Bueno",
                    "brands": "Kinder"
                }
            }));
        });

        let client = client_for(&server);
        let product = client.get_product("3017620422003").await.unwrap().unwrap();

        assert_eq!(product.product_name, "Kinder Bueno");
        assert_eq!(product.brands, "Kinder");
        assert_eq!(product.url, client.product_api_url("3017620422003"));
        assert_eq!(
            product.weburl,
            format!("{}/product/3017620422003", server.base_url())
        );
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v0/product/42.json");
            then.status(200).json_body(serde_json::json!({
                "status": 0,
                "status_verbose": "product not found"
            }));
        });

        let product = client_for(&server).get_product("42").await.unwrap();
        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_update_product_sends_brands() {
        let server = MockServer::start();
        let update_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/cgi/product_jqm2.pl")
                .x_www_form_urlencoded_tuple("code", "2")
                .x_www_form_urlencoded_tuple("user_id", "bot")
                .x_www_form_urlencoded_tuple("brands", "Kinder,Ferrero");
            then.status(200).json_body(serde_json::json!({
                "status": 1,
                "status_verbose": "fields saved"
            }));
        });

        let product = Product {
            code: "2".to_string(),
            product_name: "Kinder Bueno".to_string(),
            brands: "Kinder,Ferrero".to_string(),
            weburl: String::new(),
            url: String::new(),
        };
        let session = Session {
            user_id: "bot".to_string(),
            password: "secret".to_string(),
        };

        let saved = client_for(&server)
            .update_product(&product, &session)
            .await
            .unwrap();

        update_mock.assert();
        assert!(saved);
    }

    #[tokio::test]
    async fn test_update_product_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/cgi/product_jqm2.pl");
            then.status(200)
                .json_body(serde_json::json!({"status": 0, "status_verbose": "no code"}));
        });

        let product = Product {
            code: "2".to_string(),
            product_name: String::new(),
            brands: "A,B".to_string(),
            weburl: String::new(),
            url: String::new(),
        };
        let session = Session {
            user_id: "bot".to_string(),
            password: "secret".to_string(),
        };

        let saved = client_for(&server)
            .update_product(&product, &session)
            .await
            .unwrap();
        assert!(!saved);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&serde_json::json!(12)), Some(12));
        assert_eq!(parse_count(&serde_json::json!("7")), Some(7));
        assert_eq!(parse_count(&serde_json::json!(null)), None);
    }
}
