use actix_web::test::TestRequest;
use contact_backend::utils::get_client_ip::get_client_ip;

#[test]
fn uses_first_forwarded_for_entry() {
    let req = TestRequest::default()
        .insert_header(("x-forwarded-for", " 203.0.113.5 , 10.0.0.1, 10.0.0.2"))
        .insert_header(("x-real-ip", "198.51.100.9"))
        .to_http_request();

    assert_eq!(get_client_ip(&req), "203.0.113.5");
}

#[test]
fn falls_back_to_real_ip() {
    let req = TestRequest::default()
        .insert_header(("x-real-ip", "198.51.100.9"))
        .to_http_request();

    assert_eq!(get_client_ip(&req), "198.51.100.9");
}

#[test]
fn blank_forwarded_for_falls_through() {
    let req = TestRequest::default()
        .insert_header(("x-forwarded-for", " , 10.0.0.1"))
        .insert_header(("x-real-ip", "198.51.100.9"))
        .to_http_request();

    assert_eq!(get_client_ip(&req), "198.51.100.9");
}

#[test]
fn without_headers_the_shared_unknown_bucket_is_used() {
    let req = TestRequest::default().to_http_request();

    assert_eq!(get_client_ip(&req), "unknown");
}
