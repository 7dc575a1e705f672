//! Tests for the deferred query protocol against a recording backend.
//!
//! The backend here records every request it receives and answers with
//! canned data, so each test can assert exactly how many calls were made
//! and what they carried.

use std::future::IntoFuture;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use sfmc_lib::Ack;
use sfmc_lib::SfmcClient;
use sfmc_lib::api::query::CreateRequest;
use sfmc_lib::api::query::DeleteRequest;
use sfmc_lib::api::query::Filter;
use sfmc_lib::api::query::GetOptions;
use sfmc_lib::api::query::Operator;
use sfmc_lib::api::query::QueryRequest;
use sfmc_lib::backend::Backend;
use sfmc_lib::error::BackendError;
use sfmc_lib::error::Error;
use sfmc_lib::error::QueryError;
use sfmc_lib::model::DataExtension;
use sfmc_lib::model::Record;
use sfmc_lib::model::Row;
use sfmc_lib::model::RowSet;

#[derive(Default)]
struct RecordingBackend {
    gets: Mutex<Vec<QueryRequest>>,
    creates: Mutex<Vec<CreateRequest>>,
    deletes: Mutex<Vec<DeleteRequest>>,
    fail_with: Option<String>,
}

impl RecordingBackend {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn gets(&self) -> Vec<QueryRequest> {
        self.gets.lock().unwrap().clone()
    }

    fn total_calls(&self) -> usize {
        self.gets.lock().unwrap().len()
            + self.creates.lock().unwrap().len()
            + self.deletes.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn get(
        &self,
        _data_extension: &DataExtension,
        request: QueryRequest,
    ) -> Result<RowSet, BackendError> {
        self.gets.lock().unwrap().push(request.clone());
        if let Some(message) = &self.fail_with {
            return Err(BackendError::Network(message.clone()));
        }
        let row = request
            .fields
            .iter()
            .map(|f| (f.clone(), format!("{}-value", f)))
            .collect::<Row>();
        Ok(RowSet::new(vec![row]))
    }

    async fn create(
        &self,
        _data_extension: &DataExtension,
        request: CreateRequest,
    ) -> Result<Ack, BackendError> {
        self.creates.lock().unwrap().push(request);
        if let Some(message) = &self.fail_with {
            return Err(BackendError::Auth(message.clone()));
        }
        Ok(Ack::ok(1).with_request_id("create-1"))
    }

    async fn delete(
        &self,
        _data_extension: &DataExtension,
        request: DeleteRequest,
    ) -> Result<Ack, BackendError> {
        self.deletes.lock().unwrap().push(request);
        Ok(Ack::ok(0))
    }
}

fn setup() -> (Arc<RecordingBackend>, SfmcClient) {
    let backend = Arc::new(RecordingBackend::default());
    let client = SfmcClient::builder().backend(backend.clone()).build();
    (backend, client)
}

// =============================================================================
// Retrieve
// =============================================================================

#[tokio::test]
async fn test_get_without_filters_sends_one_request() {
    let (backend, client) = setup();

    let rows = client
        .data_extension("Subscribers")
        .get(["Id", "Email", "Status"])
        .await
        .expect("retrieve failed");

    let gets = backend.gets();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].fields, ["Id", "Email", "Status"]);
    assert!(gets[0].filters.is_empty());
    assert_eq!(gets[0].options, None);

    let columns: Vec<_> = rows.rows()[0].columns().collect();
    assert_eq!(columns, ["Id", "Email", "Status"]);
}

#[tokio::test]
async fn test_scenario_two_filters() {
    let (backend, client) = setup();

    client
        .data_extension("Subscribers")
        .get(["Id", "Email"])
        .and_where("Email", Operator::Equals, "a@x.com")
        .and_where("Status", Operator::NotEquals, "bounced")
        .await
        .expect("retrieve failed");

    let gets = backend.gets();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].fields, ["Id", "Email"]);
    assert_eq!(
        gets[0].filters,
        [
            Filter::new("Email", Operator::Equals, "a@x.com"),
            Filter::new("Status", Operator::NotEquals, "bounced"),
        ]
    );
}

#[tokio::test]
async fn test_operator_tags_in_chain() {
    let (backend, client) = setup();

    client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where_str("Email", "equals", "a@x.com")
        .unwrap()
        .and_where_str("Status", "notEquals", "bounced")
        .unwrap()
        .await
        .unwrap();

    assert_eq!(backend.gets()[0].filters[1].operator(), Operator::NotEquals);
}

#[tokio::test]
async fn test_chain_is_lazy() {
    let (backend, client) = setup();

    let query = client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where("Status", Operator::Equals, "active");
    let future = query.into_future();
    assert_eq!(backend.total_calls(), 0);

    drop(future);
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_awaiting_twice_fetches_twice() {
    let (backend, client) = setup();

    let query = client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where("Status", Operator::Equals, "active");

    let first = (&query).await.unwrap();
    let second = (&query).await.unwrap();
    query.execute().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.gets().len(), 3);
}

#[tokio::test]
async fn test_filters_follow_call_order_across_awaits() {
    let (backend, client) = setup();

    let step1 = client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where("A", Operator::Equals, "1");
    (&step1).await.unwrap();

    let step2 = step1.and_where("B", Operator::Equals, "2");
    (&step2).await.unwrap();

    let step3 = step2.and_where("C", Operator::Equals, "3");
    step3.await.unwrap();

    let columns: Vec<Vec<String>> = backend
        .gets()
        .iter()
        .map(|r| r.filters.iter().map(|f| f.column().to_string()).collect())
        .collect();
    assert_eq!(columns, vec![vec!["A"], vec!["A", "B"], vec!["A", "B", "C"]]);
}

#[tokio::test]
async fn test_branches_do_not_observe_each_other() {
    let (backend, client) = setup();

    let active = client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where("Status", Operator::Equals, "active");

    let gmail = active.clone().and_where("Email", Operator::EndsWith, "@gmail.com");
    (&active).await.unwrap();
    gmail.await.unwrap();
    (&active).await.unwrap();

    let counts: Vec<usize> = backend.gets().iter().map(|r| r.filters.len()).collect();
    assert_eq!(counts, [1, 2, 1]);
}

#[tokio::test]
async fn test_works_with_future_combinators() {
    let (backend, client) = setup();
    let subscribers = client.data_extension("Subscribers");

    let (a, b) = futures::future::join(
        subscribers
            .get(["Id"])
            .and_where("Status", Operator::Equals, "active")
            .into_future(),
        subscribers.get(["Email"]).into_future(),
    )
    .await;

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(backend.gets().len(), 2);
}

#[tokio::test]
async fn test_first_returns_first_row() {
    let (_backend, client) = setup();

    let row = client
        .data_extension("Subscribers")
        .get(["Email"])
        .first()
        .await
        .unwrap()
        .expect("row");

    assert_eq!(row.get("Email"), Some("Email-value"));
}

#[tokio::test]
async fn test_empty_field_list_is_rejected_before_backend() {
    let (backend, client) = setup();

    let result = client
        .data_extension("Subscribers")
        .get(Vec::<String>::new())
        .await;

    assert!(matches!(
        result,
        Err(Error::Query(QueryError::InvalidArgument { .. }))
    ));
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_invalid_operator_makes_no_call() {
    let (backend, client) = setup();

    let result = client
        .data_extension("Subscribers")
        .get(["Id"])
        .and_where_str("Email", "resembles", "a@x.com");

    assert_eq!(result.unwrap_err(), QueryError::invalid_operator("resembles"));
    assert!(matches!(
        Filter::parse("Email", "resembles", "a@x.com"),
        Err(QueryError::InvalidOperator { .. })
    ));
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_backend_error_is_passed_through() {
    let backend = Arc::new(RecordingBackend::failing("connection reset"));
    let client = SfmcClient::builder().backend(backend.clone()).build();

    let err = client
        .data_extension("Subscribers")
        .get(["Id"])
        .await
        .unwrap_err();

    match err {
        Error::Backend(BackendError::Network(message)) => assert_eq!(message, "connection reset"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.gets().len(), 1);
}

// =============================================================================
// Options
// =============================================================================

#[tokio::test]
async fn test_options_forwarded_unmodified() {
    let (backend, client) = setup();
    let options = GetOptions::new()
        .page_size(250)
        .set("custom", serde_json::json!({ "nested": [1, 2] }));

    client
        .data_extension("Subscribers")
        .get_with(["Id"], options.clone())
        .await
        .unwrap();

    assert_eq!(backend.gets()[0].options, Some(options));
}

#[tokio::test]
async fn test_default_options_apply_to_get_only() {
    let backend = Arc::new(RecordingBackend::default());
    let defaults = GetOptions::new().query_all_accounts(true);
    let client = SfmcClient::builder()
        .backend(backend.clone())
        .default_options(defaults.clone())
        .build();
    let subscribers = client.data_extension("Subscribers");

    subscribers.get(["Id"]).await.unwrap();
    subscribers
        .get_with(["Id"], GetOptions::new().page_size(10))
        .await
        .unwrap();

    let gets = backend.gets();
    assert_eq!(gets[0].options, Some(defaults));
    assert_eq!(gets[1].options, Some(GetOptions::new().page_size(10)));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_with_primary_key() {
    let (backend, client) = setup();

    let ack = client
        .data_extension("Subscribers")
        .create(Record::new().key("Id", "42").set("Email", "a@x.com"))
        .await
        .unwrap();

    assert!(ack.is_success());
    assert_eq!(ack.request_id(), Some("create-1"));

    let creates = backend.creates.lock().unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].fields.get("Email"), Some("a@x.com"));
}

#[tokio::test]
async fn test_create_without_primary_key_makes_no_call() {
    let (backend, client) = setup();

    let err = client
        .data_extension("Subscribers")
        .create(Record::new().set("Email", "a@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Query(QueryError::MissingPrimaryKey { ref data_extension }) if data_extension == "Subscribers"
    ));
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_create_backend_error_is_passed_through() {
    let backend = Arc::new(RecordingBackend::failing("token expired"));
    let client = SfmcClient::builder().backend(backend.clone()).build();

    let err = client
        .data_extension("Subscribers")
        .create(Record::new().key("Id", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Backend(BackendError::Auth(_))));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_unfiltered_delete_requires_confirmation() {
    let (backend, client) = setup();

    let err = client
        .data_extension("Subscribers")
        .delete()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Query(QueryError::UnfilteredDelete { .. })
    ));
    assert_eq!(backend.total_calls(), 0);

    client
        .data_extension("Subscribers")
        .delete()
        .all()
        .await
        .unwrap();

    let deletes = backend.deletes.lock().unwrap();
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].is_unfiltered());
}

#[tokio::test]
async fn test_filtered_delete() {
    let (backend, client) = setup();

    client
        .data_extension("Subscribers")
        .delete()
        .and_where("Status", Operator::Equals, "bounced")
        .await
        .unwrap();

    let deletes = backend.deletes.lock().unwrap();
    assert_eq!(
        deletes[0].filters,
        [Filter::new("Status", Operator::Equals, "bounced")]
    );
}
