//! Cloneable client handles over the actors' message channels.

mod cart;
mod catalog;
mod checkout;
mod macros;
mod orders;

pub use cart::CartClient;
pub use catalog::CatalogClient;
pub use checkout::CheckoutClient;
pub use orders::OrdersClient;

/// Generate client methods with oneshot channel boilerplate and
/// automatic tracing. Channel failures become the concern's
/// `ActorCommunicationError`.
#[macro_export]
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> std::result::Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($crate::messages::$request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
