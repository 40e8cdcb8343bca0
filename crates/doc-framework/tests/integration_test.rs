use async_trait::async_trait;
use doc_framework::mock::{create_mock_client, expect_batch, MockClient};
use doc_framework::{CollectionActor, Document, DocumentClient, CollectionClient, Query, StoreError};

// --- Test Document ---

#[derive(Clone, Debug, PartialEq)]
struct Seat {
    id: u32,
    section: String,
    reserved: bool,
}

#[derive(Debug)]
struct SeatCreate {
    section: String,
}

#[derive(Debug)]
struct SeatUpdate {
    section: Option<String>,
}

#[derive(Debug)]
enum SeatAction {
    Reserve,
    Release,
}

#[derive(Debug, thiserror::Error)]
enum SeatError {
    #[error("Seat already reserved: {0}")]
    AlreadyReserved(u32),
    #[error("{0}")]
    Store(String),
}

impl From<String> for SeatError {
    fn from(msg: String) -> Self {
        SeatError::Store(msg)
    }
}

#[async_trait]
impl Document for Seat {
    type Id = u32;
    type Create = SeatCreate;
    type Update = SeatUpdate;
    type Action = SeatAction;
    type ActionResult = bool;
    type Context = ();
    type Error = SeatError;

    fn from_create_params(id: u32, params: SeatCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            section: params.section,
            reserved: false,
        })
    }

    async fn on_update(&mut self, update: SeatUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(section) = update.section {
            self.section = section;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: SeatAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            SeatAction::Reserve if self.reserved => Err(SeatError::AlreadyReserved(self.id)),
            SeatAction::Reserve => {
                self.reserved = true;
                Ok(true)
            }
            SeatAction::Release => {
                let changed = self.reserved;
                self.reserved = false;
                Ok(changed)
            }
        }
    }
}

struct SeatClient {
    inner: CollectionClient<Seat>,
}

#[async_trait]
impl DocumentClient<Seat> for SeatClient {
    type Error = SeatError;

    fn inner(&self) -> &CollectionClient<Seat> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        SeatError::Store(e.to_string())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_collection_full_lifecycle() {
    let (actor, client) = CollectionActor::<Seat>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(SeatCreate {
            section: "patio".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, SeatAction::Reserve).await.unwrap());
    let again = client.perform_action(id, SeatAction::Reserve).await;
    assert!(matches!(again, Err(StoreError::EntityError(_))));

    let updated = client
        .update(
            id,
            SeatUpdate {
                section: Some("bar".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.section, "bar");
    assert!(updated.reserved);

    let seats = SeatClient {
        inner: client.clone(),
    };
    seats.delete(id).await.unwrap();
    assert!(seats.get(id).await.unwrap().is_none());

    drop(seats);
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_query_subscription_tracks_membership() {
    let (actor, client) = CollectionActor::<Seat>::new(10);
    tokio::spawn(actor.run(()));

    let mut free = client
        .watch_query(Query::new("free seats", |s: &Seat| !s.reserved))
        .await
        .unwrap();
    assert!(free.next().await.unwrap().is_empty());

    let a = client.create(SeatCreate { section: "a".into() }).await.unwrap();
    assert_eq!(free.next().await.unwrap().len(), 1);

    client.perform_action(a, SeatAction::Reserve).await.unwrap();
    assert!(free.next().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_closed_collection_reports_actor_closed() {
    let (actor, client) = CollectionActor::<Seat>::new(10);
    drop(actor);

    let result = client.get(1).await;
    assert!(matches!(result, Err(StoreError::ActorClosed)));
    assert!(result.unwrap_err().is_unavailable());
}

#[tokio::test]
async fn test_mock_scripted_watch_feed() {
    let mut mock = MockClient::<Seat>::new();
    let feed = mock.expect_watch(4).return_feed();
    let seats = SeatClient { inner: mock.client() };

    let mut sub = seats.watch(4).await.unwrap();
    feed.send(None).unwrap();
    feed.send(Some(Seat {
        id: 4,
        section: "bar".into(),
        reserved: false,
    }))
    .unwrap();

    assert_eq!(sub.next().await.unwrap(), None);
    assert_eq!(sub.next().await.unwrap().unwrap().section, "bar");
    mock.verify();
}

#[tokio::test]
async fn test_mock_unexpected_request_is_dropped() {
    let mut mock = MockClient::<Seat>::new();
    mock.expect_batch().return_ok(vec![true]);

    let result = mock.client().get(1).await;
    assert!(matches!(result, Err(StoreError::ActorDropped)));

    let results = mock.client().batch(vec![(1, SeatAction::Reserve)]).await.unwrap();
    assert_eq!(results, vec![true]);
    mock.verify();
}

#[tokio::test]
async fn test_raw_receiver_sees_batch_request() {
    let (client, mut receiver) = create_mock_client::<Seat>(4);

    let task = tokio::spawn(async move {
        client
            .batch(vec![(1, SeatAction::Reserve), (2, SeatAction::Reserve)])
            .await
    });

    let (actions, respond_to) = expect_batch(&mut receiver).await.expect("Expected Batch request");
    let ids: Vec<u32> = actions.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2]);
    respond_to.send(Err(StoreError::NotFound("seat 2".into()))).unwrap();

    let result = task.await.unwrap();
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
