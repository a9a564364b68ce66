use erp_core::odata::{
    entity_url, query_headers, query_url, EntityId, EntityRef, EntityRequest, Method, Query,
    ServiceEndpoint, SortDirection,
};

fn endpoint() -> ServiceEndpoint {
    ServiceEndpoint {
        resource: "https://h".to_string(),
        api_version: "1".to_string(),
        access_token: "Bearer abc".to_string(),
    }
}

#[test]
fn collection_url_has_no_query_string() {
    let url = query_url("https://h", "1", &EntityRef::collection("contact"), None);
    assert_eq!(url, "https://h/api/data/v1/contact");
}

#[test]
fn record_url_with_all_query_clauses() {
    let query = Query::new()
        .fields(["name", "email"])
        .order_by("name", SortDirection::Asc)
        .filter("active=true")
        .limit(10);
    let entity = EntityRef::record("contact", "42");

    let url = query_url("https://h", "1", &entity, Some(&query));
    assert_eq!(
        url,
        "https://h/api/data/v1/contact(42)?$select=name,email&$orderby=name asc&$filter=active=true"
    );

    let headers = query_headers("Bearer abc", Some(&query));
    assert_eq!(headers.get("Prefer").map(String::as_str), Some("odata.maxpagesize=10"));
}

#[test]
fn empty_query_leaves_url_unchanged() {
    let entity = EntityRef::record("contact", "42");
    let url = query_url("https://h", "1", &entity, Some(&Query::default()));
    assert_eq!(url, "https://h/api/data/v1/contact(42)");
}

#[test]
fn clauses_keep_fixed_order_when_some_are_missing() {
    let query = Query::new().filter("statecode eq 0").fields(["fullname"]);
    let url = query_url("https://h", "9.0", &EntityRef::collection("contacts"), Some(&query));
    assert_eq!(
        url,
        "https://h/api/data/v9.0/contacts?$select=fullname&$filter=statecode eq 0"
    );
}

#[test]
fn empty_fields_and_filter_are_skipped() {
    let query = Query::new().fields(Vec::<String>::new()).filter("");
    assert_eq!(query.query_string(), None);

    let from_job: Query =
        serde_json::from_value(serde_json::json!({ "fields": [], "orderBy": { "field": "name" } }))
            .unwrap();
    assert_eq!(from_job.query_string().as_deref(), Some("$orderby=name asc"));
}

#[test]
fn order_by_descending() {
    let query = Query::new().order_by("createdon", SortDirection::Desc);
    assert_eq!(query.query_string().as_deref(), Some("$orderby=createdon desc"));
}

#[test]
fn page_size_defaults_to_zero() {
    let headers = query_headers("t", None);
    assert_eq!(headers.get("Prefer").map(String::as_str), Some("odata.maxpagesize=0"));

    let headers = query_headers("t", Some(&Query::new().filter("x")));
    assert_eq!(headers.get("Prefer").map(String::as_str), Some("odata.maxpagesize=0"));
}

#[test]
fn trailing_slash_on_resource_is_not_doubled() {
    let url = entity_url("https://h/", "1", &EntityRef::collection("contact"));
    assert_eq!(url, "https://h/api/data/v1/contact");
}

#[test]
fn create_request_targets_collection_with_body() {
    let req = EntityRequest::create(&endpoint(), "contact", serde_json::json!({"name": "Ada"}));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://h/api/data/v1/contact");
    assert_eq!(req.body, Some(serde_json::json!({"name": "Ada"})));
    assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
    assert_eq!(req.headers.get("OData-MaxVersion").map(String::as_str), Some("4.0"));
    assert_eq!(req.headers.get("OData-Version").map(String::as_str), Some("4.0"));
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert!(!req.headers.contains_key("Prefer"));
}

#[test]
fn update_and_delete_target_the_record() {
    let id = EntityId::new("00000000-0000-0000-0000-000000000001");
    let update = EntityRequest::update(&endpoint(), "accounts", &id, serde_json::json!({}));
    assert_eq!(update.method, Method::Patch);
    assert_eq!(
        update.url,
        "https://h/api/data/v1/accounts(00000000-0000-0000-0000-000000000001)"
    );

    let delete = EntityRequest::delete(&endpoint(), "accounts", &id);
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.url, update.url);
    assert!(delete.body.is_none());
}

#[test]
fn debug_output_redacts_authorization() {
    let req = EntityRequest::query(&endpoint(), &EntityRef::collection("contact"), None);
    let dbg = format!("{req:?}");
    assert!(!dbg.contains("Bearer abc"));
    assert!(dbg.contains("<redacted>"));
}

#[test]
fn entity_id_accepts_numbers() {
    let id: EntityId = serde_json::from_value(serde_json::json!(42)).unwrap();
    assert_eq!(id.as_str(), "42");
}

#[test]
fn query_deserializes_from_camel_case() {
    let query: Query = serde_json::from_value(serde_json::json!({
        "fields": ["name"],
        "orderBy": { "field": "name", "direction": "desc" },
        "limit": 5
    }))
    .unwrap();
    assert_eq!(query.page_size(), 5);
    assert_eq!(query.query_string().as_deref(), Some("$select=name&$orderby=name desc"));
}
