use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    ApiResponse, AvailableSlotsResponse, Booking, BookingFilter, BookingStatus, DateAvailability,
    Listing, NewBooking, StatusUpdate,
};

use crate::config::ClientConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub listing_id: String,
    pub doctor_id: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub doctor_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Backend operations the booking flow depends on.
#[async_trait(?Send)]
pub trait BookingApi {
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing, ApiError>;

    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlotsResponse, ApiError>;

    async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<DateAvailability, ApiError>;

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError>;

    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, ApiError>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ApiError>;

    async fn user_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn doctor_bookings(
        &self,
        doctor_id: &str,
        filter: &BookingFilter,
    ) -> Result<Vec<Booking>, ApiError>;
}

/// Where the bearer token lives. In the browser this is `localStorage`.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorageToken {
    key: String,
}

impl LocalStorageToken {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenSource for LocalStorageToken {
    fn token(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()?
                .local_storage()
                .ok()
                .flatten()?
                .get_item(&self.key)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }

        // No client storage during server rendering.
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &self.key;
            None
        }
    }
}

#[derive(Clone)]
pub struct BookingsClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl BookingsClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            Arc::new(LocalStorageToken::new(config.token_storage_key.clone())),
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            leptos::logging::warn!("bookings API error ({}): {}", status, body);
            return Err(ApiError::from_response_body(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.send::<ApiResponse<T>>(builder)
            .await
            .map(|envelope| envelope.data)
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait(?Send)]
impl BookingApi for BookingsClient {
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing, ApiError> {
        let path = format!("/listings/{}", segment(listing_id));
        self.send_data(self.request(Method::GET, &path)).await
    }

    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlotsResponse, ApiError> {
        let builder = self
            .request(Method::GET, "/bookings/available-slots")
            .query(query);
        self.send(builder).await
    }

    async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<DateAvailability, ApiError> {
        let builder = self
            .request(Method::GET, "/bookings/check-availability")
            .query(query);
        self.send_data(builder).await
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        let builder = self.request(Method::POST, "/bookings").json(booking);
        self.send_data(builder).await
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}/cancel", segment(booking_id));
        self.send_data(self.request(Method::PATCH, &path)).await
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let path = format!("/bookings/{}/status", segment(booking_id));
        let builder = self
            .request(Method::PATCH, &path)
            .json(&StatusUpdate { status });
        self.send_data(builder).await
    }

    async fn user_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.send_data(self.request(Method::GET, "/bookings/user"))
            .await
    }

    async fn doctor_bookings(
        &self,
        doctor_id: &str,
        filter: &BookingFilter,
    ) -> Result<Vec<Booking>, ApiError> {
        let path = format!("/bookings/doctor/{}", segment(doctor_id));
        let builder = self.request(Method::GET, &path).query(filter);
        self.send_data(builder).await
    }
}
