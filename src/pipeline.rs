// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FormatError, StoreError, TransportError};
use crate::format::{DateStyle, format_status, parse_bill_date, try_format_date};
use crate::models::{FormattedBill, RawBill, UserSession};
use crate::overlay::Overlay;
use crate::router::{OnNavigate, RoutePath};
use crate::session::{Storage, read_user};
use crate::store::BillsStore;
use crate::view::{EyeIcon, receipt_preview};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

const RECEIPT_IMG_WIDTH: u32 = 400;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Vec<FormattedBill>),
    TransportError(TransportError),
}

impl FetchOutcome {
    pub fn bills(&self) -> Option<&[FormattedBill]> {
        match self {
            FetchOutcome::Success(b) => Some(b),
            FetchOutcome::TransportError(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TransportError> {
        match self {
            FetchOutcome::Success(_) => None,
            FetchOutcome::TransportError(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Monotonic request counter; only the most recently issued ticket may
/// publish an outcome.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: Cell<u64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> LoadTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        LoadTicket(next)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest.get()
    }
}

pub fn format_bill(raw: &RawBill, style: DateStyle) -> Result<FormattedBill, FormatError> {
    let date = try_format_date(&raw.date, style)?;
    Ok(FormattedBill {
        date,
        ..best_effort(raw)
    })
}

fn best_effort(raw: &RawBill) -> FormattedBill {
    FormattedBill {
        id: raw.id.clone(),
        r#type: raw.r#type.clone(),
        name: raw.name.clone(),
        date: raw.date.clone(),
        raw_date: raw.date.clone(),
        sort_key: parse_bill_date(&raw.date),
        amount: raw.amount,
        status: format_status(&raw.status),
        file_url: raw.file_url.clone(),
        file_name: raw.file_name.clone(),
    }
}

/// Newest first by the stored date. Stable, so equal dates keep fetch order;
/// unparseable dates sink to the end.
pub fn sort_newest_first(bills: &mut [FormattedBill]) {
    bills.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
}

pub fn format_bills(raws: &[RawBill], style: DateStyle) -> Vec<FormattedBill> {
    let mut out: Vec<FormattedBill> = raws
        .iter()
        .map(|raw| {
            format_bill(raw, style).unwrap_or_else(|e| {
                warn!(bill = %raw.id, error = %e, "keeping bill with unformatted fields");
                best_effort(raw)
            })
        })
        .collect();
    sort_newest_first(&mut out);
    out
}

pub struct BillsContext {
    pub store: Option<Rc<dyn BillsStore>>,
    pub storage: Option<Rc<dyn Storage>>,
    pub on_navigate: OnNavigate,
    pub overlay: Rc<dyn Overlay>,
    pub date_style: DateStyle,
    pub generation: Rc<RequestGeneration>,
}

impl BillsContext {
    pub fn new(on_navigate: OnNavigate, overlay: Rc<dyn Overlay>) -> Self {
        BillsContext {
            store: None,
            storage: None,
            on_navigate,
            overlay,
            date_style: DateStyle::default(),
            generation: Rc::new(RequestGeneration::new()),
        }
    }

    pub fn with_store(mut self, store: Option<Rc<dyn BillsStore>>) -> Self {
        self.store = store;
        self
    }

    pub fn with_storage(mut self, storage: Option<Rc<dyn Storage>>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.date_style = style;
        self
    }

    pub fn with_generation(mut self, generation: Rc<RequestGeneration>) -> Self {
        self.generation = generation;
        self
    }
}

/// Container behind the Bills view.
pub struct Bills {
    store: Option<Rc<dyn BillsStore>>,
    on_navigate: OnNavigate,
    overlay: Rc<dyn Overlay>,
    date_style: DateStyle,
    generation: Rc<RequestGeneration>,
    user: Option<UserSession>,
}

impl Bills {
    /// Reads the session once. The store is expected to arrive already
    /// scoped to that user (bearer token or email filter), so `fetch` only
    /// reports who it is fetching for and never filters on its own.
    pub fn new(ctx: BillsContext) -> Self {
        let user = ctx.storage.as_deref().and_then(|s| match read_user(s) {
            Ok(u) => Some(u),
            Err(e) => {
                debug!(error = %e, "no usable session");
                None
            }
        });
        Bills {
            store: ctx.store,
            on_navigate: ctx.on_navigate,
            overlay: ctx.overlay,
            date_style: ctx.date_style,
            generation: ctx.generation,
            user,
        }
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.user.as_ref()
    }

    pub fn fetch(&self) -> Result<Vec<RawBill>, StoreError> {
        match &self.store {
            Some(store) => {
                let email = self.user.as_ref().and_then(|u| u.email.as_deref());
                debug!(user = email.unwrap_or("-"), "fetching bills");
                store.list()
            }
            None => {
                debug!("no store configured, nothing to fetch");
                Ok(Vec::new())
            }
        }
    }

    pub fn begin_load(&self) -> LoadTicket {
        self.generation.issue()
    }

    /// Turns a store result into an outcome, or `None` when a newer load
    /// was started after `ticket`.
    pub fn finish_load(
        &self,
        ticket: LoadTicket,
        result: Result<Vec<RawBill>, StoreError>,
    ) -> Option<FetchOutcome> {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "discarding stale bills result");
            return None;
        }
        Some(self.resolve(result))
    }

    fn resolve(&self, result: Result<Vec<RawBill>, StoreError>) -> FetchOutcome {
        match result {
            Ok(raws) => {
                let bills = format_bills(&raws, self.date_style);
                info!(count = bills.len(), "bills loaded");
                FetchOutcome::Success(bills)
            }
            Err(e) => {
                let err = TransportError::from(&e);
                warn!(code = err.code(), error = %e, "bills fetch failed");
                FetchOutcome::TransportError(err)
            }
        }
    }

    /// Fetches and resolves in one go. Still issues a ticket, so any load
    /// begun earlier is superseded.
    pub fn load(&self) -> FetchOutcome {
        self.begin_load();
        self.resolve(self.fetch())
    }

    pub fn handle_click_new_bill(&self) {
        (self.on_navigate)(RoutePath::NewBill.as_str());
    }

    pub fn handle_click_icon_eye(&self, icon: &EyeIcon) {
        let body = receipt_preview(icon.bill_url.as_deref(), RECEIPT_IMG_WIDTH);
        self.overlay.show(&body.into_string());
    }
}
