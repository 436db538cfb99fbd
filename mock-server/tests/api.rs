use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use lead_mock_server::{app, app_with_base_path, Reply};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn upsert_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/lead/upsert")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_leads_empty() {
    let resp = app().oneshot(get_request("/lead")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.code, 200);
    assert_eq!(reply.list, Some(Vec::new()));
}

// --- upsert ---

#[tokio::test]
async fn upsert_without_id_creates() {
    let resp = app()
        .oneshot(upsert_request(
            r#"{"first_name":"Ana","last_name":"Gomez","email":"ana@x.com","mobile_phone":"111","interestProgram":"Data Science"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.code, 200);
    let lead = reply.lead.unwrap();
    assert!(!lead.id.is_empty());
    assert_eq!(lead.incremental, 1);
    assert_eq!(lead.full_name, "Ana Gomez");
    assert_eq!(lead.interest_program, "Data Science");
    assert!(!lead.deleted);
}

#[tokio::test]
async fn upsert_unknown_id_returns_404() {
    let resp = app()
        .oneshot(upsert_request(r#"{"_id":"missing","deleted":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.code, 404);
    assert!(reply.lead.is_none());
}

#[tokio::test]
async fn upsert_malformed_json_is_rejected() {
    let resp = app().oneshot(upsert_request(r#"{"first_name":1}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_lead_not_found() {
    let resp = app().oneshot(get_request("/lead/get/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.code, 404);
    assert_eq!(reply.message.as_deref(), Some("lead nope not found"));
}

#[tokio::test]
async fn encoded_id_is_decoded_as_one_segment() {
    let resp = app().oneshot(get_request("/lead/get/a%2Fb%3Fc=1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let reply: Reply = body_json(resp).await;
    assert_eq!(reply.message.as_deref(), Some("lead a/b?c=1 not found"));
}

// --- delete ---

#[tokio::test]
async fn delete_lead_not_found() {
    let resp = app().oneshot(get_request("/lead/delete/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- base path ---

#[tokio::test]
async fn custom_base_path_replaces_default() {
    let resp = app_with_base_path("/prospects")
        .oneshot(get_request("/prospects"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app_with_base_path("/prospects")
        .oneshot(get_request("/lead"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

// --- full lifecycle ---

#[tokio::test]
async fn lead_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upsert_request(
            r#"{"first_name":"Beto","last_name":"Ruiz","email":"beto@x.com","mobile_phone":"222","interestProgram":"Marketing Digital"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json::<Reply>(resp).await.lead.unwrap();
    let id = created.id.clone();

    // list: one lead
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/lead"))
        .await
        .unwrap();
    let list = body_json::<Reply>(resp).await.list.unwrap();
    assert_eq!(list, vec![created.clone()]);

    // partial update: only the phone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upsert_request(&format!(r#"{{"_id":"{id}","mobile_phone":"999"}}"#)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json::<Reply>(resp).await.lead.unwrap();
    assert_eq!(updated.mobile_phone, "999");
    assert_eq!(updated.email, "beto@x.com"); // unchanged
    assert_eq!(updated.incremental, created.incremental);

    // soft delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upsert_request(&format!(r#"{{"_id":"{id}","deleted":true}}"#)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let soft_deleted = body_json::<Reply>(resp).await.lead.unwrap();
    assert!(soft_deleted.deleted);
    assert_eq!(soft_deleted.first_name, "Beto"); // untouched

    // list: soft-deleted lead is hidden
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/lead"))
        .await
        .unwrap();
    assert!(body_json::<Reply>(resp).await.list.unwrap().is_empty());

    // get: still reachable by id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/lead/get/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json::<Reply>(resp).await.lead.unwrap().deleted);

    // hard delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/lead/delete/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json::<Reply>(resp).await.code, 200);

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/lead/get/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
