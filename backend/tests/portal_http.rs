use std::sync::{Arc, Mutex};

use adapters::{AdapterError, RestBackend, RestRequest};
use async_trait::async_trait;
use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use backend::build_app;
use backend::config::Config;
use backend::state::AppState;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use serde_json::{json, Value};

/// Stands in for the institutional REST service.
#[derive(Default)]
struct FakeBackend {
    seen: Mutex<Vec<RestRequest>>,
}

#[async_trait]
impl RestBackend for FakeBackend {
    async fn send(&self, request: RestRequest) -> Result<Value, AdapterError> {
        self.seen.lock().unwrap().push(request.clone());

        if request.path == "/auth/login" {
            let body = request.body.unwrap_or_default();
            return match body["password"].as_str() {
                Some("secret") => Ok(json!({ "token": "tok-1", "role": "faculty", "userId": 42 })),
                _ => Err(AdapterError::Unauthorized { status: 401 }),
            };
        }

        if request.path == "/students/missing" {
            return Err(AdapterError::Status {
                status: 404,
                body: json!({ "message": "no such student" }),
            });
        }

        match request.bearer.as_deref() {
            Some("expired") => Err(AdapterError::Unauthorized { status: 401 }),
            bearer => Ok(json!({
                "path": request.path,
                "bearer": bearer,
                "method": format!("{:?}", request.method),
                "body": request.body,
            })),
        }
    }
}

/// A running portal on a loopback port, in front of a fake backend.
struct Portal {
    base: String,
    client: Client,
    backend: Arc<FakeBackend>,
}

/// Serves `app` on a loopback port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
    format!("http://{addr}")
}

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client")
}

impl Portal {
    async fn start() -> Self {
        let backend = Arc::new(FakeBackend::default());
        let state = AppState::with_backend(Config::default(), backend.clone());
        Self {
            base: serve(build_app(state)).await,
            client: client(),
            backend,
        }
    }

    async fn page(&self, path: &str, entries: &[(&str, &str)]) -> Response {
        let mut request = self.client.get(format!("{}{path}", self.base));
        if !entries.is_empty() {
            request = request.header(COOKIE, cookies(entries));
        }
        request.send().await.expect("send")
    }

    async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client
            .post(format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await
            .expect("send")
    }
}

fn cookies(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(name, value)| format!("{name}={}", hex::encode(value)))
        .collect::<Vec<_>>()
        .join("; ")
}

async fn body_json(response: Response) -> Value {
    response.json().await.expect("json body")
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check_answers_with_a_request_id() {
    let portal = Portal::start().await;
    let response = portal.page("/healthz", &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.expect("text"), "ok");
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let portal = Portal::start().await;
    let response = portal
        .client
        .get(format!("{}/about", portal.base))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .expect("send");

    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn protected_page_without_session_redirects_with_empty_body() {
    let portal = Portal::start().await;
    let response = portal.page("/placement/admin-home", &[]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/placement/login");
    assert!(response.bytes().await.expect("body").is_empty());
}

#[tokio::test]
async fn role_without_token_still_redirects() {
    let portal = Portal::start().await;
    let response = portal
        .page("/placement/staff-home", &[("role", "Staff"), ("userId", "7")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/placement/login");
}

#[tokio::test]
async fn student_is_denied_the_student_list() {
    let portal = Portal::start().await;
    let response = portal
        .page(
            "/records/student-list",
            &[("token", "t"), ("role", "student"), ("userId", "s1")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let view = body_json(response).await;
    assert_eq!(view["title"], "Access Denied");
    assert_eq!(view["lines"][0], "Current role: Student");
    assert_eq!(view["lines"][1], "Required roles: Admin");
    assert_eq!(view["action"]["href"], "/auth/logout?system=records");
    assert_ne!(view["page"], "StudentList");
}

#[tokio::test]
async fn admin_sees_the_student_list_with_sidebar() {
    let portal = Portal::start().await;
    let response = portal
        .page(
            "/records/student-list",
            &[("token", "t"), ("userRole", "ADMIN"), ("userId", "a1")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["page"], "StudentList");
    assert_eq!(view["system"], "records");
    assert_eq!(view["chrome"]["layout"], "records");
    assert_eq!(view["chrome"]["sidebar"], "AdminSidebar");
    assert_eq!(view["providers"].as_array().expect("providers").len(), 20);
}

#[tokio::test]
async fn records_sidebar_follows_path_and_role() {
    let portal = Portal::start().await;
    let staff = [("token", "t"), ("role", "staff"), ("userId", "f1")];

    let login = body_json(portal.page("/records/login", &staff).await).await;
    assert_eq!(login["page"], "RecordsLogin");
    assert!(login["chrome"]["sidebar"].is_null());

    let dashboard = body_json(portal.page("/records/dashboard", &staff).await).await;
    assert_eq!(dashboard["chrome"]["sidebar"], "StaffSidebar");
}

#[tokio::test]
async fn placement_navbar_follows_role() {
    let portal = Portal::start().await;
    let view = body_json(
        portal
            .page("/placement/drives/7", &[("token", "t"), ("role", "teacher")])
            .await,
    )
    .await;

    assert_eq!(view["page"], "DriveDetail");
    assert_eq!(view["params"]["id"], "7");
    assert_eq!(view["chrome"]["navbar"], "StaffNavbar");
}

#[tokio::test]
async fn student_routes_mount_the_scoped_provider() {
    let portal = Portal::start().await;
    let view = body_json(
        portal
            .page(
                "/records/profile",
                &[("token", "t"), ("role", "student"), ("userId", "s1")],
            )
            .await,
    )
    .await;

    assert_eq!(view["page"], "StudentProfile");
    assert_eq!(view["scopedProviders"], json!(["StudentData"]));
}

#[tokio::test]
async fn unknown_page_renders_not_found_in_site_chrome() {
    let portal = Portal::start().await;
    let response = portal.page("/records/nowhere", &[]).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let view = body_json(response).await;
    assert_eq!(view["page"], "NotFound");
    assert_eq!(view["chrome"]["layout"], "site");
}

#[tokio::test]
async fn login_writes_session_cookies_and_returns_role_home() {
    let portal = Portal::start().await;
    let response = portal
        .post_json(
            "/auth/login",
            json!({ "email": "f@college.edu", "password": "secret", "system": "placement" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let written = set_cookies(&response);
    let token = format!("token={};", hex::encode("tok-1"));
    let user_id = format!("userId={};", hex::encode("42"));
    assert!(written.iter().any(|c| c.starts_with(&token)));
    assert!(written.iter().any(|c| c.starts_with(&user_id)));

    let outcome = body_json(response).await;
    assert_eq!(outcome["redirect"], "/placement/staff-home");
    assert_eq!(outcome["authenticated"], true);
    assert_eq!(outcome["role"], "Staff");
}

#[tokio::test]
async fn rejected_login_is_unauthorized_and_writes_nothing() {
    let portal = Portal::start().await;
    let response = portal
        .post_json(
            "/auth/login",
            json!({ "email": "f@college.edu", "password": "wrong" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn logout_clears_every_cookie_and_redirects() {
    let portal = Portal::start().await;
    let response = portal
        .client
        .post(format!("{}/auth/logout?system=records", portal.base))
        .header(COOKIE, cookies(&[("token", "t"), ("role", "admin"), ("userId", "1")]))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/records/login");
    let written = set_cookies(&response);
    assert_eq!(written.len(), 3);
    assert!(written.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn proxy_attaches_the_bearer_token() {
    let portal = Portal::start().await;
    let response = portal
        .page("/api/rest/drives?year=2024", &[("token", "tok-9"), ("role", "admin")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["path"], "/drives?year=2024");
    assert_eq!(body["bearer"], "tok-9");
    assert_eq!(portal.backend.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn backend_rejection_ends_the_session_centrally() {
    let portal = Portal::start().await;
    let response = portal
        .client
        .get(format!("{}/api/rest/companies", portal.base))
        .header(REFERER, "http://portal.local/placement/companies")
        .header(COOKIE, cookies(&[("token", "expired"), ("role", "admin"), ("userId", "1")]))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let written = set_cookies(&response);
    assert_eq!(written.len(), 3);
    assert!(written.iter().all(|c| c.contains("Max-Age=0")));

    let body = body_json(response).await;
    assert_eq!(body["redirect"], "/placement/login");
}

#[tokio::test]
async fn context_lists_every_domain_provider() {
    let portal = Portal::start().await;
    let providers = body_json(portal.page("/api/context", &[]).await).await;

    let providers = providers.as_array().expect("provider list");
    assert_eq!(providers.len(), 20);
    assert!(providers.iter().any(|p| p["provider"] == "CourseProvider"));
}

#[tokio::test]
async fn unknown_context_domain_is_not_found() {
    let portal = Portal::start().await;
    let response = portal.page("/api/context/payroll", &[("token", "t")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_requires_a_user_id() {
    let portal = Portal::start().await;
    let response = portal
        .page("/api/me/profile", &[("token", "t"), ("role", "student")])
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = portal
        .page(
            "/api/me/profile",
            &[("token", "t"), ("role", "student"), ("userId", "s1")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let seen = portal.backend.seen.lock().unwrap();
    assert_eq!(seen[0].path, "/students/s1/profile");
    assert!(seen[0].timeout.is_some());
}

#[tokio::test]
async fn doubled_slashes_still_guard_by_the_route_system() {
    let portal = Portal::start().await;
    let response = portal.page("//records/dashboard", &[]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/records/login");
}

#[tokio::test]
async fn doubled_slashes_never_bring_the_sidebar_to_login() {
    let portal = Portal::start().await;
    let staff = [("token", "t"), ("role", "staff"), ("userId", "f1")];
    let view = body_json(portal.page("//records//login/", &staff).await).await;

    assert_eq!(view["page"], "RecordsLogin");
    assert_eq!(view["path"], "/records/login");
    assert!(view["chrome"]["sidebar"].is_null());
}

#[tokio::test]
async fn proxy_carries_updates_and_deletes() {
    let portal = Portal::start().await;
    let session = cookies(&[("token", "tok-9"), ("role", "admin")]);

    let put = portal
        .client
        .put(format!("{}/api/rest/students/1", portal.base))
        .header(COOKIE, &session)
        .json(&json!({ "name": "Asha" }))
        .send()
        .await
        .expect("put");
    assert_eq!(put.status(), StatusCode::OK);
    let put = body_json(put).await;
    assert_eq!(put["method"], "Put");
    assert_eq!(put["body"]["name"], "Asha");
    assert_eq!(put["bearer"], "tok-9");

    let patch = portal
        .client
        .patch(format!("{}/api/rest/students/1", portal.base))
        .header(COOKIE, &session)
        .json(&json!({ "cgpa": 8.1 }))
        .send()
        .await
        .expect("patch");
    assert_eq!(body_json(patch).await["method"], "Patch");

    let delete = portal
        .client
        .delete(format!("{}/api/rest/students/1", portal.base))
        .header(COOKIE, &session)
        .send()
        .await
        .expect("delete");
    assert_eq!(delete.status(), StatusCode::OK);
    let delete = body_json(delete).await;
    assert_eq!(delete["method"], "Delete");
    assert!(delete["body"].is_null());
}

#[tokio::test]
async fn backend_client_errors_keep_status_and_body() {
    let portal = Portal::start().await;
    let response = portal
        .page("/api/rest/students/missing", &[("token", "t"), ("role", "admin")])
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(body_json(response).await["message"], "no such student");
}

#[tokio::test]
async fn proxy_refuses_absolute_targets_and_keeps_the_token_home() {
    let stolen = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorder = stolen.clone();
    let elsewhere = serve(Router::new().route(
        "/steal",
        get(move |headers: HeaderMap| {
            let recorder = recorder.clone();
            async move {
                if let Some(auth) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                    recorder.lock().unwrap().push(auth.to_string());
                }
                "ok"
            }
        }),
    ))
    .await;

    let config = Config {
        api_base_url: "http://127.0.0.1:9/api".to_string(),
        ..Config::default()
    };
    let state = AppState::new(config).expect("state");
    let base = serve(build_app(state)).await;

    let response = client()
        .get(format!("{base}/api/rest/{elsewhere}/steal"))
        .header(COOKIE, cookies(&[("token", "secret-token"), ("role", "admin")]))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stolen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn me_needs_a_session() {
    let portal = Portal::start().await;

    let response = portal.page("/api/me", &[]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "not signed in");

    let response = portal
        .page("/api/me", &[("token", "t"), ("role", "ADMINISTRATOR"), ("userId", "a1")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["authenticated"], true);
    assert_eq!(me["role"], "Admin");
    assert_eq!(me["userId"], "a1");
}

#[tokio::test]
async fn session_status_reports_both_states() {
    let portal = Portal::start().await;

    let anonymous = body_json(portal.page("/auth/session", &[]).await).await;
    assert_eq!(anonymous["authenticated"], false);
    assert!(anonymous["role"].is_null());

    let partial = body_json(portal.page("/auth/session", &[("role", "coordinator")]).await).await;
    assert_eq!(partial["authenticated"], false);
    assert_eq!(partial["role"], "Coordinator");

    let staff = body_json(
        portal
            .page("/auth/session", &[("token", "t"), ("user_role", "faculty")])
            .await,
    )
    .await;
    assert_eq!(staff["authenticated"], true);
    assert_eq!(staff["role"], "Staff");
}

#[tokio::test]
async fn logout_from_a_page_returns_to_its_system_login() {
    let portal = Portal::start().await;
    let response = portal
        .client
        .post(format!("{}/auth/logout?from=/placement/companies", portal.base))
        .header(COOKIE, cookies(&[("token", "t"), ("role", "staff")]))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/placement/login");
    assert_eq!(set_cookies(&response).len(), 2);

    let response = portal
        .client
        .post(format!("{}/auth/logout", portal.base))
        .send()
        .await
        .expect("send");
    assert_eq!(response.headers()[LOCATION], "/");
}

#[tokio::test]
async fn staff_cannot_load_student_data() {
    let portal = Portal::start().await;
    let response = portal
        .page("/api/me/profile", &[("token", "t"), ("role", "staff"), ("userId", "f1")])
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(portal.backend.seen.lock().unwrap().is_empty());
}
