//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! channel, then answer each request with the `expect_*` helpers.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

pub type MockReceiver<T> = mpsc::Receiver<ResourceRequest<T>>;

/// A client wired to a channel the test controls instead of a
/// `ResourceActor`. The test plays the actor: it inspects each request and
/// chooses the reply (success, rejection, or a dropped responder).
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, MockReceiver<T>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a Create request.
pub async fn expect_create<T: Entity>(
    receiver: &mut MockReceiver<T>,
) -> Option<(T::CreatePayload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(receiver: &mut MockReceiver<T>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Entity>(receiver: &mut MockReceiver<T>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_update<T: Entity>(
    receiver: &mut MockReceiver<T>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete<T: Entity>(receiver: &mut MockReceiver<T>) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut MockReceiver<T>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::CustomerClient;
    use crate::domain::{Customer, CustomerFields};
    use crate::error::RemoteError;

    fn fields() -> CustomerFields {
        CustomerFields {
            name: "Test".to_string(),
            mobile_no: "555".to_string(),
            preferences: String::new(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let create_task = tokio::spawn(async move { client.create_customer(fields()).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        let created = Customer {
            id: 1,
            name: payload.name,
            mobile_no: payload.mobile_no,
            preferences: payload.preferences,
            address: payload.address,
        };
        responder.send(Ok(created.clone())).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(created));
    }

    #[tokio::test]
    async fn test_missing_row_becomes_not_found() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let get_task = tokio::spawn(async move { client.get_customer(42).await });
        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 42);
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            get_task.await.unwrap(),
            Err(RemoteError::NotFound("customer 42".to_string()))
        );
    }

    #[tokio::test]
    async fn test_dropped_responder() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let delete_task = tokio::spawn(async move { client.delete_customer(7).await });
        let (_, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        drop(responder);

        assert_eq!(
            delete_task.await.unwrap(),
            Err(RemoteError::ActorCommunicationError(FrameworkError::ActorDropped.to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_sends_id_and_patch() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let update_task = tokio::spawn(async move { client.update_customer(3, fields()).await });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, 3);
        assert_eq!(patch.mobile_no, "555");
        responder
            .send(Err(FrameworkError::Rejected("Customer name is required".to_string())))
            .unwrap();

        assert_eq!(
            update_task.await.unwrap(),
            Err(RemoteError::Rejected("Customer name is required".to_string()))
        );
    }
}
