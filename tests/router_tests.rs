// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billed::error::StoreError;
use billed::format::DateStyle;
use billed::models::{NewBill, RawBill};
use billed::overlay::ModalOverlay;
use billed::router::{AppContext, NavIcon, OnNavigate, RoutePath, Router};
use billed::session::{MemoryStorage, Storage};
use billed::store::{BillsStore, MemoryStore};
use billed::view::{self, ACTIVE_ICON_CLASS};
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;

const FIXTURE: &str = include_str!("fixtures/bills.json");

fn setup() -> (Rc<Router>, Rc<MemoryStore>, Rc<ModalOverlay>) {
    let store = Rc::new(MemoryStore::from_json(FIXTURE).unwrap());
    let storage = Rc::new(MemoryStorage::new());
    storage
        .set_item("user", r#"{"type":"Employee","email":"a@a"}"#)
        .unwrap();
    let overlay = Rc::new(ModalOverlay::new());
    let store_cap: Rc<dyn BillsStore> = store.clone();
    let storage_cap: Rc<dyn Storage> = storage;
    let router = Router::new(AppContext {
        store: Some(store_cap),
        storage: Some(storage_cap),
        overlay: overlay.clone(),
        date_style: DateStyle::Iso,
    });
    (router, store, overlay)
}

fn active_icons(markup: &str) -> Vec<String> {
    Regex::new(r#"class="[^"]*active-icon[^"]*" data-testid="([^"]*)""#)
        .unwrap()
        .captures_iter(markup)
        .map(|c| c[1].to_string())
        .collect()
}

fn row_count(markup: &str) -> usize {
    Regex::new(r"(?s)<tbody[^>]*>(.*?)</tbody>")
        .unwrap()
        .captures(markup)
        .map(|c| c[1].matches("<tr>").count())
        .unwrap_or(0)
}

#[test]
fn bills_route_highlights_window_icon() {
    let (router, _, _) = setup();
    router.on_navigate(RoutePath::Bills.as_str());
    assert_eq!(router.current_path(), Some(RoutePath::Bills));
    assert_eq!(router.active_icon(), Some(NavIcon::Window));
    assert_eq!(active_icons(&router.root()), vec!["icon-window"]);
}

#[test]
fn bills_route_fetches_and_renders_rows() {
    let (router, store, _) = setup();
    router.on_navigate("#employee/bills");
    let root = router.root();
    assert!(root.contains("Mes notes de frais"));
    assert_eq!(row_count(&root), 4);
    let first_cell = Regex::new(r"(?s)<tbody[^>]*>.*?<td>(.*?)</td>")
        .unwrap()
        .captures(&root)
        .map(|c| c[1].to_string())
        .unwrap();
    assert_eq!(first_cell, "Hôtel et logement");
    assert_eq!(store.list_calls(), 1);
}

#[test]
fn renavigating_keeps_state() {
    let (router, store, _) = setup();
    router.on_navigate(RoutePath::Bills.as_str());
    let before = router.state();
    router.on_navigate(RoutePath::Bills.as_str());
    assert_eq!(router.state(), before);
    assert_eq!(active_icons(&router.root()).len(), 1);
    // Re-rendered, so the store was hit again
    assert_eq!(store.list_calls(), 2);
}

#[test]
fn not_found_error_is_rendered() {
    let (router, store, _) = setup();
    store.fail_next_list("Erreur 404");
    router.on_navigate(RoutePath::Bills.as_str());
    let root = router.root();
    assert!(root.contains("Erreur 404"));
    assert_eq!(row_count(&root), 0);
    assert!(!root.contains("<tr"));
    assert_eq!(active_icons(&root), vec!["icon-window"]);
}

#[test]
fn server_error_is_rendered() {
    let (router, store, _) = setup();
    store.fail_next_list("Erreur 500");
    router.on_navigate(RoutePath::Bills.as_str());
    let root = router.root();
    assert!(root.contains("Erreur 500"));
    assert!(!root.contains("<tr"));
}

#[test]
fn unknown_route_falls_back_to_login() {
    let (router, _, _) = setup();
    router.on_navigate("#admin/nowhere");
    assert_eq!(router.current_path(), Some(RoutePath::Login));
    assert_eq!(router.active_icon(), None);
    assert!(router.root().contains(r#"data-testid="login-page""#));
}

#[test]
fn new_bill_button_moves_to_new_bill_route() {
    let (router, _, _) = setup();
    router.on_navigate(RoutePath::Bills.as_str());
    let page = router.bills_page().unwrap();
    page.handle_click_new_bill();

    assert_eq!(router.current_path(), Some(RoutePath::NewBill));
    assert_eq!(active_icons(&router.root()), vec!["icon-mail"]);
    assert!(router.bills_page().is_none());
}

#[test]
fn eye_icons_on_mounted_page_open_modal() {
    let (router, _, overlay) = setup();
    router.on_navigate(RoutePath::Bills.as_str());
    let page = router.bills_page().unwrap();
    let icons = view::eye_icons(&router.root());
    assert_eq!(icons.len(), 4);
    for (i, icon) in icons.iter().enumerate() {
        page.handle_click_icon_eye(icon);
        assert_eq!(overlay.show_count(), i + 1);
        assert!(overlay.is_visible());
    }
}

/// Redirects while its own `list` is in flight, making that result stale.
struct RedirectingStore {
    inner: MemoryStore,
    nav: RefCell<Option<OnNavigate>>,
}

impl BillsStore for RedirectingStore {
    fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        if let Some(nav) = self.nav.borrow().as_ref() {
            nav(RoutePath::NewBill.as_str());
        }
        self.inner.list()
    }

    fn create(&self, bill: &NewBill) -> Result<RawBill, StoreError> {
        self.inner.create(bill)
    }

    fn update(&self, id: &str, bill: &RawBill) -> Result<RawBill, StoreError> {
        self.inner.update(id, bill)
    }
}

#[test]
fn later_navigation_wins_over_stale_bills_result() {
    let store = Rc::new(RedirectingStore {
        inner: MemoryStore::from_json(FIXTURE).unwrap(),
        nav: RefCell::new(None),
    });
    let store_cap: Rc<dyn BillsStore> = store.clone();
    let router = Router::new(AppContext {
        store: Some(store_cap),
        storage: None,
        overlay: Rc::new(ModalOverlay::new()),
        date_style: DateStyle::Iso,
    });
    *store.nav.borrow_mut() = Some(router.navigator());

    router.on_navigate(RoutePath::Bills.as_str());
    assert_eq!(router.current_path(), Some(RoutePath::NewBill));
    assert_eq!(router.active_icon(), Some(NavIcon::Mail));
    assert!(!router.root().contains("Mes notes de frais"));
    assert_eq!(router.root().matches(ACTIVE_ICON_CLASS).count(), 1);
}
