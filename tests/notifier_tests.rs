use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use actix_web::{post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use contact_backend::{
    entities::contact::ContactFormData,
    errors::DeliveryError,
    notifier::{
        build_notifier,
        console::{format_console_record, ConsoleNotifier},
        email::{EmailNotifier, EmailRequest},
        Notifier,
    },
    settings::{AppConfig, DeliveryMode},
};
use serde_json::{json, Value};

fn form(input: Value) -> ContactFormData {
    ContactFormData::parse(&input).expect("valid submission")
}

fn sample() -> ContactFormData {
    form(json!({
        "name": "Tom & Jerry",
        "email": "tom@example.com",
        "projectType": "אפליקציה",
        "message": "We need an app.\nAs soon as possible.",
        "selectedPackage": "basic"
    }))
}

#[derive(Default)]
struct ProviderLog {
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

struct FakeProvider {
    url: String,
    log: Arc<ProviderLog>,
}

#[post("/emails")]
async fn fake_send(
    request: HttpRequest,
    body: web::Json<Value>,
    log: web::Data<ProviderLog>,
    status: web::Data<u16>,
) -> impl Responder {
    let auth = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    log.requests.lock().unwrap().push((auth, body.into_inner()));

    let status = actix_web::http::StatusCode::from_u16(*status.get_ref()).unwrap();
    HttpResponse::build(status).json(json!({ "id": "fake-id", "message": "provider says hi" }))
}

async fn spawn_provider(status: u16) -> FakeProvider {
    let log = web::Data::new(ProviderLog::default());
    let log_handle = log.clone().into_inner();
    let status = web::Data::new(status);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(log.clone())
            .app_data(status.clone())
            .service(fake_send)
    })
    .listen(listener)
    .expect("Failed to bind fake provider")
    .workers(1)
    .run();
    tokio::spawn(server);

    FakeProvider {
        url: format!("http://127.0.0.1:{}", port),
        log: log_handle,
    }
}

fn notifier_for(url: &str) -> EmailNotifier {
    EmailNotifier::new(
        url,
        "test-api-key",
        "site@example.com",
        "owner@example.com",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[test]
fn console_record_has_fixed_layout() {
    let record = format_console_record(&sample());
    let lines: Vec<&str> = record.lines().collect();

    assert_eq!(lines[1], "Name: Tom & Jerry");
    assert_eq!(lines[2], "Email: tom@example.com");
    assert_eq!(lines[3], "Project Type: אפליקציה");
    assert_eq!(lines[4], "Selected Package: basic");
    assert_eq!(lines[5], "Message: We need an app.");
    assert_eq!(*lines.last().unwrap(), "---");
}

#[test]
fn console_record_shows_none_without_package() {
    let data = form(json!({
        "name": "Dana",
        "email": "dana@example.com",
        "projectType": "site",
        "message": "Hello there, friend"
    }));

    assert!(format_console_record(&data).contains("Selected Package: None"));
}

#[actix_rt::test]
async fn console_notifier_never_fails() {
    assert!(ConsoleNotifier.deliver(&sample()).await.is_ok());
    assert_eq!(ConsoleNotifier.mode(), "console");
}

#[test]
fn email_request_is_addressed_and_rtl() {
    let request = EmailRequest::for_submission(&sample(), "site@example.com", "owner@example.com");

    assert_eq!(request.from, "site@example.com");
    assert_eq!(request.to, vec!["owner@example.com".to_string()]);
    assert_eq!(request.reply_to, "tom@example.com");
    assert!(request.subject.contains("Tom & Jerry"));
    assert!(request.subject.contains("אפליקציה"));
    assert!(request.html.contains(r#"dir="rtl""#));
    assert!(request.html.contains("&amp;"));
    assert!(!request.html.contains("Tom & Jerry"));
}

#[actix_rt::test]
async fn email_notifier_posts_to_provider() {
    let provider = spawn_provider(200).await;
    let notifier = notifier_for(&provider.url);

    notifier.deliver(&sample()).await.unwrap();

    let requests = provider.log.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-api-key"));
    assert_eq!(body["to"], json!(["owner@example.com"]));
    assert_eq!(body["reply_to"], "tom@example.com");
}

#[actix_rt::test]
async fn provider_error_status_is_a_delivery_failure() {
    let provider = spawn_provider(422).await;
    let notifier = notifier_for(&format!("{}/", provider.url));

    let err = notifier.deliver(&sample()).await.unwrap_err();

    match err {
        DeliveryError::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("provider says hi"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[actix_rt::test]
async fn unreachable_provider_is_a_transport_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let notifier = notifier_for(&format!("http://127.0.0.1:{}", port));

    let err = notifier.deliver(&sample()).await.unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}

#[test]
fn build_notifier_follows_delivery_mode() {
    let console = build_notifier(&AppConfig::default()).unwrap();
    assert_eq!(console.mode(), "console");

    let email_config = AppConfig {
        email_service: DeliveryMode::Email,
        email_api_key: "key".into(),
        email_from: "site@example.com".into(),
        email_to: "owner@example.com".into(),
        ..AppConfig::default()
    };
    assert_eq!(build_notifier(&email_config).unwrap().mode(), "email");

    let missing_key = AppConfig {
        email_service: DeliveryMode::Email,
        ..AppConfig::default()
    };
    assert!(matches!(
        build_notifier(&missing_key),
        Err(DeliveryError::NotConfigured(_))
    ));
}
