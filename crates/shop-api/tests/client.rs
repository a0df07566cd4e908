use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use reqwest::blocking::Client;
use shop_api::{CatalogSource, FetchError, StaticSource, StoreClient, load_catalog};
use shop_catalog::{Product, ProductId};

/// Serve a single canned HTTP response on a loopback port. The request
/// line (e.g. `GET /products HTTP/1.1`) is sent back over the channel.
fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (request_tx, request_rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let _ = request_tx.send(request_line.trim_end().to_string());
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    (base_url, request_rx)
}

fn client(base_url: &str) -> StoreClient {
    let http = Client::builder().no_proxy().build().unwrap();
    StoreClient::with_http_client(base_url, http).unwrap()
}

/// A loopback URL with nothing listening on it.
fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

const PRODUCTS: &str = r#"[
  {"id": 1, "title": "Fjallraven - Foldsack No. 1 Backpack", "price": 109.95,
   "description": "Your perfect pack", "category": "men's clothing",
   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
   "rating": {"rate": 3.9, "count": 120}},
  {"id": 2, "title": "Mens Casual Premium Slim Fit T-Shirts", "price": "oops",
   "description": "Slim-fitting style", "category": "men's clothing",
   "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg"},
  {"id": 3, "title": "Mens Cotton Jacket", "price": 55.99,
   "description": "great outerwear jackets", "category": "men's clothing",
   "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg"}
]"#;

#[test]
fn test_fetch_products_validates_records() {
    let (base_url, requests) = serve_once("200 OK", PRODUCTS);
    let decoded = client(&base_url).fetch_products().unwrap();

    assert_eq!(requests.recv().unwrap(), "GET /products HTTP/1.1");
    let ids: Vec<u64> = decoded.products.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(decoded.rejected.len(), 1);
    assert_eq!(decoded.rejected[0].id, Some(2));
}

#[test]
fn test_fetch_products_server_error_is_unavailable() {
    let (base_url, _requests) = serve_once("500 Internal Server Error", "{}");
    assert_eq!(
        client(&base_url).fetch_products().unwrap_err(),
        FetchError::CatalogUnavailable
    );
}

#[test]
fn test_fetch_products_network_error_is_unavailable() {
    assert_eq!(
        client(&dead_url()).fetch_products().unwrap_err(),
        FetchError::CatalogUnavailable
    );
}

#[test]
fn test_fetch_products_wrong_shape_is_unavailable() {
    let (base_url, _requests) = serve_once("200 OK", r#"{"products": []}"#);
    assert_eq!(
        load_catalog(&client(&base_url)).unwrap_err(),
        FetchError::CatalogUnavailable
    );
}

#[test]
fn test_bogus_category_is_not_found() {
    let (base_url, requests) = serve_once("404 Not Found", r#"{"error": "no such category"}"#);
    let result = client(&base_url).fetch_category("bogus-category");

    assert_eq!(
        requests.recv().unwrap(),
        "GET /products/category/bogus-category HTTP/1.1"
    );
    assert_eq!(
        result.unwrap_err(),
        FetchError::CategoryNotFound("bogus-category".to_string())
    );
}

#[test]
fn test_empty_category_is_not_an_error() {
    let (base_url, requests) = serve_once("200 OK", "[]");
    let decoded = client(&base_url).fetch_category("men's clothing").unwrap();

    assert_eq!(
        requests.recv().unwrap(),
        "GET /products/category/men's%20clothing HTTP/1.1"
    );
    assert!(decoded.products.is_empty());
    assert!(decoded.rejected.is_empty());
}

#[test]
fn test_fetch_product() {
    let body = r#"{"id": 3, "title": "Mens Cotton Jacket", "price": 55.99,
        "description": "great outerwear jackets", "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg"}"#;
    let (base_url, requests) = serve_once("200 OK", body);

    let product = client(&base_url).fetch_product(ProductId(3)).unwrap();
    assert_eq!(requests.recv().unwrap(), "GET /products/3 HTTP/1.1");
    assert_eq!(product.title, "Mens Cotton Jacket");
    assert_eq!(product.display_price(), "$55.99");
}

#[test]
fn test_missing_product_with_empty_body_is_not_found() {
    let (base_url, _requests) = serve_once("200 OK", "");
    assert_eq!(
        client(&base_url).fetch_product(ProductId(999)).unwrap_err(),
        FetchError::ProductNotFound("999".to_string())
    );
}

#[test]
fn test_fetch_categories() {
    let body = r#"["electronics", "jewelery", "men's clothing", "women's clothing"]"#;
    let (base_url, requests) = serve_once("200 OK", body);

    let categories = client(&base_url).fetch_categories().unwrap();
    assert_eq!(
        requests.recv().unwrap(),
        "GET /products/categories HTTP/1.1"
    );
    assert_eq!(
        categories,
        vec!["electronics", "jewelery", "men's clothing", "women's clothing"]
    );
}

#[test]
fn test_fetch_categories_failure() {
    assert_eq!(
        client(&dead_url()).fetch_categories().unwrap_err(),
        FetchError::CategoriesUnavailable
    );
}

#[test]
fn test_static_source_distinguishes_missing_and_empty_categories() {
    let product = Product {
        id: ProductId(5),
        title: "John Hardy Women's Legends Naga Bracelet".to_string(),
        price: rust_decimal_macros::dec!(695),
        image: "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg".to_string(),
        category: "jewelery".to_string(),
        description: String::new(),
        rating: None,
    };
    let source = StaticSource::new(vec![product]).with_empty_category("electronics");

    let jewelery = source.fetch_category("jewelery").unwrap();
    assert_eq!(jewelery.products.len(), 1);
    let electronics = source.fetch_category("electronics").unwrap();
    assert!(electronics.products.is_empty());
    assert_eq!(
        source.fetch_category("bogus-category").unwrap_err(),
        FetchError::CategoryNotFound("bogus-category".to_string())
    );
    assert_eq!(
        source.fetch_categories().unwrap(),
        vec!["electronics", "jewelery"]
    );
}
