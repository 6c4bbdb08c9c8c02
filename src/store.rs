// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{NewBill, RawBill};
use anyhow::Result;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::time::Duration;
use tracing::debug;

const UA: &str = concat!(
    "billed/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/billed)"
);

/// Capability over the remote `bills` collection. Every call is single-shot:
/// no retry and no caching.
pub trait BillsStore {
    fn list(&self) -> Result<Vec<RawBill>, StoreError>;
    fn create(&self, bill: &NewBill) -> Result<RawBill, StoreError>;
    fn update(&self, id: &str, bill: &RawBill) -> Result<RawBill, StoreError>;
}

pub fn http_client(timeout: Duration) -> Result<Client> {
    let c = Client::builder().timeout(timeout).user_agent(UA).build()?;
    Ok(c)
}

pub struct HttpStore {
    client: Client,
    base: String,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        Ok(HttpStore {
            client: http_client(timeout)?,
            base: api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    fn authorized(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        }
    }

    fn send<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T, StoreError> {
        let resp = self.authorized(rb).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            debug!(status = status.as_u16(), %body, "store request rejected");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl BillsStore for HttpStore {
    fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        debug!(url = %self.url("bills"), "listing bills");
        self.send(self.client.get(self.url("bills")))
    }

    fn create(&self, bill: &NewBill) -> Result<RawBill, StoreError> {
        self.send(self.client.post(self.url("bills")).json(bill))
    }

    fn update(&self, id: &str, bill: &RawBill) -> Result<RawBill, StoreError> {
        self.send(
            self.client
                .patch(self.url(&format!("bills/{}", id)))
                .json(bill),
        )
    }
}

/// In-process store used offline and as a test double.
#[derive(Default)]
pub struct MemoryStore {
    bills: RefCell<Vec<RawBill>>,
    scope: Option<String>,
    fail_next: RefCell<Option<String>>,
    list_calls: Cell<usize>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new(bills: Vec<RawBill>) -> Self {
        MemoryStore {
            bills: RefCell::new(bills),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(MemoryStore::new(serde_json::from_str(json)?))
    }

    /// Restricts `list` to the bills of one user.
    pub fn scoped_to(mut self, email: Option<String>) -> Self {
        self.scope = email;
        self
    }

    /// Makes the next `list` call fail with `message`, then behave normally.
    pub fn fail_next_list(&self, message: impl Into<String>) {
        *self.fail_next.borrow_mut() = Some(message.into());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn snapshot(&self) -> Vec<RawBill> {
        self.bills.borrow().clone()
    }
}

impl BillsStore for MemoryStore {
    fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(msg) = self.fail_next.borrow_mut().take() {
            return Err(StoreError::Message(msg));
        }
        let bills = self.bills.borrow();
        Ok(match &self.scope {
            Some(email) => bills.iter().filter(|b| &b.email == email).cloned().collect(),
            None => bills.clone(),
        })
    }

    fn create(&self, bill: &NewBill) -> Result<RawBill, StoreError> {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let created = RawBill {
            id: format!("local-{}", n),
            email: bill.email.clone(),
            r#type: bill.r#type.clone(),
            name: bill.name.clone(),
            date: bill.date.clone(),
            amount: bill.amount,
            status: bill.status.clone(),
            comment_admin: None,
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
            vat: bill.vat.clone(),
            pct: bill.pct,
            commentary: bill.commentary.clone(),
        };
        self.bills.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update(&self, id: &str, bill: &RawBill) -> Result<RawBill, StoreError> {
        let mut bills = self.bills.borrow_mut();
        let slot = bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(StoreError::not_found)?;
        *slot = RawBill {
            id: id.to_string(),
            ..bill.clone()
        };
        Ok(slot.clone())
    }
}
