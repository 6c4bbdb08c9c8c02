// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure markup renderers. Nothing here touches the mounted root; the router
//! is the only place that injects the returned markup.

use crate::error::TransportError;
use crate::models::FormattedBill;
use crate::pipeline::FetchOutcome;
use crate::router::NavIcon;
use maud::{Markup, html};
use once_cell::sync::Lazy;
use regex::Regex;

pub const ACTIVE_ICON_CLASS: &str = "active-icon";
pub const RECEIPT_MODAL_ID: &str = "modaleFile";
pub const RECEIPT_PLACEHOLDER: &str = "Aucun justificatif disponible";

/// Receipt-view affordance as read back from rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_url: Option<String>,
}

impl EyeIcon {
    pub fn new(bill_url: Option<&str>) -> Self {
        EyeIcon {
            bill_url: bill_url.map(str::to_string),
        }
    }
}

pub fn layout(active: Option<NavIcon>, content: Markup) -> Markup {
    html! {
        div class="layout" {
            div class="vertical-navbar" {
                div class="layout-title" { "Billed" }
                @for icon in NavIcon::ALL {
                    div id=(icon.element_id()) class=(icon_class(icon, active)) data-testid=(icon.test_id()) {}
                }
            }
            (content)
        }
    }
}

fn icon_class(icon: NavIcon, active: Option<NavIcon>) -> String {
    if active == Some(icon) {
        format!("icon {}", ACTIVE_ICON_CLASS)
    } else {
        "icon".to_string()
    }
}

fn bill_row(bill: &FormattedBill) -> Markup {
    let kind = bill.r#type.as_str();
    html! {
        tr {
            td { (kind) }
            td { (bill.name) }
            td { (bill.date) }
            td { (bill.amount) " €" }
            td { (bill.status) }
            td {
                div class="icon-actions" {
                    div id="eye" data-testid="icon-eye" data-bill-url=[bill.file_url.as_deref()] { "👁" }
                }
            }
        }
    }
}

fn receipt_modal() -> Markup {
    html! {
        div class="modal fade" id=(RECEIPT_MODAL_ID) tabindex="-1" role="dialog" aria-hidden="true" {
            div class="modal-dialog modal-dialog-centered modal-lg" role="document" {
                div class="modal-content" {
                    div class="modal-header" {
                        h5 class="modal-title" { "Justificatif" }
                        button type="button" class="close" data-dismiss="modal" aria-label="Close" {
                            span aria-hidden="true" { "×" }
                        }
                    }
                    div class="modal-body" {}
                }
            }
        }
    }
}

pub fn receipt_preview(bill_url: Option<&str>, img_width: u32) -> Markup {
    html! {
        div class="bill-proof-container" style="text-align: center;" {
            @match bill_url {
                Some(url) => {
                    img width=(img_width) src=(url) alt="Bill";
                }
                None => {
                    p class="bill-proof-missing" { (RECEIPT_PLACEHOLDER) }
                }
            }
        }
    }
}

pub fn error_page(error: &TransportError) -> Markup {
    html! {
        div class="content" {
            div class="content-header" {
                div class="content-title" { "Erreur" }
            }
            div class="error-page" data-testid="error-message" data-error-code=(error.code()) {
                (error.user_message())
            }
        }
    }
}

/// One outcome only: either the table or the error, never both.
pub fn bills_page(outcome: &FetchOutcome) -> Markup {
    let content = match outcome {
        FetchOutcome::Success(bills) => html! {
            div class="content" {
                div class="content-header" {
                    div class="content-title" { "Mes notes de frais" }
                    button type="button" class="btn btn-primary" data-testid="btn-new-bill" {
                        "Nouvelle note de frais"
                    }
                }
                div id="data-table" {
                    table id="example" class="table table-striped" style="width:100%" {
                        thead {
                            tr {
                                th { "Type" }
                                th { "Nom" }
                                th { "Date" }
                                th { "Montant" }
                                th { "Statut" }
                                th { "Actions" }
                            }
                        }
                        tbody data-testid="tbody" {
                            @for bill in bills {
                                (bill_row(bill))
                            }
                        }
                    }
                }
            }
            (receipt_modal())
        },
        FetchOutcome::TransportError(e) => error_page(e),
    };
    layout(Some(NavIcon::Window), content)
}

pub fn new_bill_page() -> Markup {
    let content = html! {
        div class="content" {
            div class="content-header" {
                div class="content-title" { "Envoyer une note de frais" }
            }
            div class="form-newbill-container content-inner" data-testid="form-new-bill" {}
        }
    };
    layout(Some(NavIcon::Mail), content)
}

pub fn login_page() -> Markup {
    html! {
        div class="login-page" data-testid="login-page" {
            h1 { "Billed" }
            p { "Veuillez vous connecter" }
        }
    }
}

static EYE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"data-testid="icon-eye"(?:\s+data-bill-url="([^"]*)")?"#).unwrap()
});

fn unescape_attr(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Every receipt affordance in `markup`, in document order.
pub fn eye_icons(markup: &str) -> Vec<EyeIcon> {
    EYE_RE
        .captures_iter(markup)
        .map(|c| EyeIcon {
            bill_url: c.get(1).map(|m| unescape_attr(m.as_str())),
        })
        .collect()
}
