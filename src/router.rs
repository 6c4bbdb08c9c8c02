// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::RouteNotFound;
use crate::format::DateStyle;
use crate::overlay::Overlay;
use crate::pipeline::{Bills, BillsContext, RequestGeneration};
use crate::session::Storage;
use crate::store::BillsStore;
use crate::view;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Navigation entry point shared by icon clicks and internal redirects.
pub type OnNavigate = Rc<dyn Fn(&str)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoutePath {
    #[default]
    Login,
    Bills,
    NewBill,
}

impl RoutePath {
    pub const ALL: [RoutePath; 3] = [RoutePath::Login, RoutePath::Bills, RoutePath::NewBill];

    pub fn as_str(self) -> &'static str {
        match self {
            RoutePath::Login => "/",
            RoutePath::Bills => "#employee/bills",
            RoutePath::NewBill => "#employee/bill/new",
        }
    }

    pub fn icon(self) -> Option<NavIcon> {
        match self {
            RoutePath::Login => None,
            RoutePath::Bills => Some(NavIcon::Window),
            RoutePath::NewBill => Some(NavIcon::Mail),
        }
    }
}

impl FromStr for RoutePath {
    type Err = RouteNotFound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutePath::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| RouteNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavIcon {
    Window,
    Mail,
}

impl NavIcon {
    pub const ALL: [NavIcon; 2] = [NavIcon::Window, NavIcon::Mail];

    pub fn test_id(self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }

    pub fn element_id(self) -> &'static str {
        match self {
            NavIcon::Window => "layout-icon1",
            NavIcon::Mail => "layout-icon2",
        }
    }

    pub fn path(self) -> RoutePath {
        match self {
            NavIcon::Window => RoutePath::Bills,
            NavIcon::Mail => RoutePath::NewBill,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub current: Option<RoutePath>,
    pub active_icon: Option<NavIcon>,
    pub root: String,
}

/// Collaborators handed to every view the router builds.
pub struct AppContext {
    pub store: Option<Rc<dyn BillsStore>>,
    pub storage: Option<Rc<dyn Storage>>,
    pub overlay: Rc<dyn Overlay>,
    pub date_style: DateStyle,
}

pub struct Router {
    ctx: AppContext,
    state: RefCell<NavigationState>,
    generation: Rc<RequestGeneration>,
    bills: RefCell<Option<Rc<Bills>>>,
    this: Weak<Router>,
}

impl Router {
    pub fn new(ctx: AppContext) -> Rc<Router> {
        Rc::new_cyclic(|this| Router {
            ctx,
            state: RefCell::new(NavigationState::default()),
            generation: Rc::new(RequestGeneration::new()),
            bills: RefCell::new(None),
            this: this.clone(),
        })
    }

    /// The entry point views call to change route. Holds the router weakly.
    pub fn navigator(&self) -> OnNavigate {
        let this = self.this.clone();
        Rc::new(move |key: &str| {
            if let Some(router) = this.upgrade() {
                router.on_navigate(key);
            }
        })
    }

    pub fn on_navigate(&self, key: &str) {
        let route = key.parse::<RoutePath>().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to login");
            RoutePath::default()
        });
        debug!(route = route.as_str(), "navigating");
        match route {
            RoutePath::Bills => self.show_bills(),
            RoutePath::NewBill => self.show_static(route, view::new_bill_page().into_string()),
            RoutePath::Login => self.show_static(route, view::login_page().into_string()),
        }
    }

    fn show_bills(&self) {
        let ctx = BillsContext::new(self.navigator(), self.ctx.overlay.clone())
            .with_store(self.ctx.store.clone())
            .with_storage(self.ctx.storage.clone())
            .with_date_style(self.ctx.date_style)
            .with_generation(self.generation.clone());
        let bills = Rc::new(Bills::new(ctx));
        *self.bills.borrow_mut() = Some(bills.clone());

        let ticket = bills.begin_load();
        let result = bills.fetch();
        if let Some(outcome) = bills.finish_load(ticket, result) {
            self.mount(RoutePath::Bills, view::bills_page(&outcome).into_string());
        }
    }

    fn show_static(&self, route: RoutePath, markup: String) {
        // Supersedes any bills load still in flight.
        self.generation.issue();
        *self.bills.borrow_mut() = None;
        self.mount(route, markup);
    }

    fn mount(&self, route: RoutePath, markup: String) {
        let mut state = self.state.borrow_mut();
        state.current = Some(route);
        state.active_icon = route.icon();
        state.root = markup;
        info!(route = route.as_str(), "view mounted");
    }

    pub fn root(&self) -> String {
        self.state.borrow().root.clone()
    }

    pub fn current_path(&self) -> Option<RoutePath> {
        self.state.borrow().current
    }

    pub fn active_icon(&self) -> Option<NavIcon> {
        self.state.borrow().active_icon
    }

    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Container behind the mounted Bills view, if that is the current route.
    pub fn bills_page(&self) -> Option<Rc<Bills>> {
        self.bills.borrow().clone()
    }
}
