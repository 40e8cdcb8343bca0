//! # Profile Client

use crate::clients::recover;
use crate::model::{ProfileCreate, ProfileUpdate, UserId, UserProfile};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use doc_framework::{CollectionClient, DocumentClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProfileClient {
    inner: CollectionClient<UserProfile>,
}

impl ProfileClient {
    pub fn new(inner: CollectionClient<UserProfile>) -> Self {
        Self { inner }
    }

    /// Stores the profile under the user's identity-provider id.
    #[instrument(skip(self))]
    pub async fn create_profile(&self, uid: UserId, params: ProfileCreate) -> Result<UserId, ProfileError> {
        debug!("Sending request");
        self.inner.insert(uid, params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, uid: UserId, update: ProfileUpdate) -> Result<UserProfile, ProfileError> {
        debug!("Sending request");
        self.inner.update(uid, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl DocumentClient<UserProfile> for ProfileClient {
    type Error = ProfileError;

    fn inner(&self) -> &CollectionClient<UserProfile> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        recover(e, |e| match e {
            StoreError::NotFound(id) => ProfileError::NotFound(id),
            StoreError::AlreadyExists(id) => ProfileError::AlreadyExists(id),
            e => ProfileError::ActorCommunicationError(e.to_string()),
        })
    }
}
