//! Submission sequencing: one live submission at a time.
//!
//! A submission fetches current conditions first and reports them, then
//! continues to the forecast only when the current fetch succeeded. A new
//! submission aborts whatever the previous one still had in flight, so at
//! most one request is live. A delivered current result is never rolled
//! back by a later forecast failure.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::WeatherClient;
use crate::types::{CurrentConditions, DailySummary, WeatherError};

/// Events emitted over the session channel, in submission order.
///
/// On `Current(Ok(..))` the caller records the city in the search history
/// exactly once; the forecast outcome must not affect that.
#[derive(Debug)]
pub enum SessionEvent {
    Current(Result<(CurrentConditions, bool), WeatherError>),
    Forecast(Result<(Vec<DailySummary>, bool), WeatherError>),
}

pub struct WeatherSession {
    client: Arc<WeatherClient>,
    tx: mpsc::UnboundedSender<SessionEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl WeatherSession {
    pub fn new(client: WeatherClient) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                tx,
                in_flight: None,
            },
            rx,
        )
    }

    /// Start a submission for `city`, aborting any prior in-flight one.
    pub fn submit(&mut self, city: &str) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
            tracing::debug!("Aborted in-flight weather submission");
        }

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let city = city.to_string();
        self.in_flight = Some(tokio::spawn(async move {
            let current = client.current(&city).await;
            let succeeded = current.is_ok();
            let _ = tx.send(SessionEvent::Current(current));
            if !succeeded {
                return;
            }
            let forecast = client.forecast(&city).await;
            let _ = tx.send(SessionEvent::Forecast(forecast));
        }));
    }

    /// Wait for the in-flight submission to finish (one-shot flows).
    pub async fn join(&mut self) {
        if let Some(task) = self.in_flight.take() {
            let _ = task.await;
        }
    }
}

impl Drop for WeatherSession {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
