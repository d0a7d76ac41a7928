//! Macro-generated boilerplate for clients backed by a collection actor.

#[macro_export]
macro_rules! impl_collection_client_methods {
    ($client_name:ident, $record:ty, $error:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $singular>](
                    &self,
                    id: <$record as $crate::store::Record>::Id,
                ) -> Result<Option<$record>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(|e| match e {
                        $crate::store::StoreError::Disconnected => {
                            <$error>::ActorCommunicationError("store disconnected".to_string())
                        }
                        other => <$error>::DatabaseError(other.to_string()),
                    })
                }

                #[tracing::instrument(skip(self))]
                #[allow(dead_code)]
                pub async fn [<list_ $plural>](&self) -> Result<Vec<$record>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err(|e| match e {
                        $crate::store::StoreError::Disconnected => {
                            <$error>::ActorCommunicationError("store disconnected".to_string())
                        }
                        other => <$error>::DatabaseError(other.to_string()),
                    })
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $record:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::store::CollectionClient<$record>) -> Self {
                Self { inner }
            }
        }
    };
}
