//! End-to-end page flows through a live store with a stubbed storefront.
//!
//! These run under paused Tokio time so the debounce windows elapse
//! deterministically.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use playgrid_events::form::FormAction;
use playgrid_events::page::{EventPageReducer, PageAction, PageEnvironment, PagePhase, PageState};
use playgrid_events::{CheckoutAction, TicketAction, Timings, UpsellAction};
use playgrid_runtime::Store;
use playgrid_storefront::{
    ComplementaryProduct, Money, Product, ProductId, StorefrontError, Variant, VariantId,
};
use playgrid_testing::mocks::StubStorefront;

type PageStore = Store<PageState, PageAction, PageEnvironment, EventPageReducer>;

fn variant(id: &str, title: &str, cents: i64, available: i64) -> Variant {
    Variant {
        id: VariantId::new(id).unwrap(),
        title: title.into(),
        price: Money::from_cents(cents),
        currency: "USD".into(),
        quantity_available: Some(available),
        selected_options: vec![],
    }
}

fn league_night() -> Product {
    Product {
        id: ProductId::new("1").unwrap(),
        title: "League Night".into(),
        handle: Some("league-night".into()),
        description: None,
        game_type: Some("Magic".into()),
        start_time: None,
        duration_minutes: Some(180),
        format: Some("Commander".into()),
        requires_partner_account: false,
        total_inventory: Some(20),
        variants: vec![
            variant("11", "Single Entry", 1500, 8),
            variant("12", "VIP", 4500, 2),
        ],
        complementary: vec![ComplementaryProduct {
            id: ProductId::new("2").unwrap(),
            title: "Sleeves".into(),
            variants: vec![variant("21", "Red", 500, 3)],
        }],
    }
}

fn store_with(stub: StubStorefront) -> (PageStore, Arc<StubStorefront>) {
    let storefront = Arc::new(stub);
    let store = Store::new(
        PageState::default(),
        EventPageReducer,
        PageEnvironment {
            storefront: Arc::clone(&storefront) as Arc<dyn playgrid_storefront::Storefront>,
            timings: Timings::default(),
        },
    );
    (store, storefront)
}

/// Let spawned effect tasks run; under paused time this also advances past
/// any armed timers.
async fn settle(store: &PageStore) {
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if store.pending_debounces() == 0 {
            break;
        }
    }
}

async fn load_page(store: &PageStore) {
    store
        .send(PageAction::Load {
            handle: "league-night".into(),
        })
        .await
        .unwrap();
    settle(store).await;
    assert_eq!(store.state(|s| s.phase).await, PagePhase::Ready);
}

async fn answer_magic_form(store: &PageStore) {
    store
        .send(PageAction::Form(FormAction::AnswerAccount {
            has_account: true,
        }))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn full_flow_selects_adds_and_redirects() {
    let (store, storefront) = store_with(StubStorefront::new().with_product(league_night()));
    load_page(&store).await;

    // default selection already wrote the event line
    assert_eq!(
        store.state(|s| s.cart.subtotal()).await,
        Money::from_cents(1500)
    );

    // reselect to VIP; the cart write is debounced
    store
        .send(PageAction::Ticket(TicketAction::Select {
            variant_id: VariantId::new("12").unwrap(),
        }))
        .await
        .unwrap();
    assert_eq!(
        store.state(|s| s.cart.subtotal()).await,
        Money::from_cents(1500)
    );
    settle(&store).await;
    assert_eq!(
        store.state(|s| s.cart.subtotal()).await,
        Money::from_cents(4500)
    );

    // add sleeves
    store
        .send(PageAction::Upsell(UpsellAction::RequestAdd { card: 0 }))
        .await
        .unwrap();
    settle(&store).await;
    assert_eq!(store.state(|s| s.cart.lines().len()).await, 2);

    // the form question for Magic has no sub-field
    answer_magic_form(&store).await;

    store
        .send(PageAction::Checkout(CheckoutAction::Submit))
        .await
        .unwrap();
    settle(&store).await;

    let redirect = store.state(|s| s.checkout.redirect_to.clone()).await;
    assert_eq!(redirect.as_deref(), Some("https://checkout.test/cart/stub"));

    let carts = storefront.recorded_carts();
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].len(), 2);
    // event registration first, with the attendee attributes attached
    assert_eq!(carts[0][0].merchandise_id.numeric(), "12");
    assert_eq!(carts[0][0].quantity, 1);
    assert!(carts[0][0].attributes.iter().any(|a| a.key == "Game"));
    assert_eq!(carts[0][1].merchandise_id.numeric(), "21");
}

#[tokio::test(start_paused = true)]
async fn rapid_reselection_commits_only_the_last_choice() {
    let (store, _) = store_with(StubStorefront::new().with_product(league_night()));
    load_page(&store).await;

    for id in ["12", "11", "12"] {
        store
            .send(PageAction::Ticket(TicketAction::Select {
                variant_id: VariantId::new(id).unwrap(),
            }))
            .await
            .unwrap();
    }
    assert_eq!(store.pending_debounces(), 1);

    settle(&store).await;
    let view = store.state(PageState::cart_view).await;
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].variant_label, "VIP");
}

#[tokio::test(start_paused = true)]
async fn double_submit_creates_one_cart() {
    let (store, storefront) = store_with(StubStorefront::new().with_product(league_night()));
    load_page(&store).await;
    answer_magic_form(&store).await;

    store
        .send(PageAction::Checkout(CheckoutAction::Submit))
        .await
        .unwrap();
    store
        .send(PageAction::Checkout(CheckoutAction::Submit))
        .await
        .unwrap();
    settle(&store).await;

    assert_eq!(storefront.cart_creations(), 1);
    assert!(store.state(|s| s.checkout.redirect_to.is_some()).await);
}

#[tokio::test(start_paused = true)]
async fn failed_cart_creation_recovers_on_retry() {
    let stub = StubStorefront::new().with_product(league_night());
    stub.push_cart_result(Err(StorefrontError::Api {
        message: "throttled".into(),
    }));
    let (store, storefront) = store_with(stub);
    load_page(&store).await;
    answer_magic_form(&store).await;

    store
        .send(PageAction::Checkout(CheckoutAction::Submit))
        .await
        .unwrap();
    settle(&store).await;

    let (submitting, notice, redirect) = store
        .state(|s| {
            (
                s.checkout.submitting,
                s.notice.clone(),
                s.checkout.redirect_to.clone(),
            )
        })
        .await;
    assert!(!submitting);
    assert!(redirect.is_none());
    assert_eq!(
        notice.unwrap().message,
        "Something went wrong. Please try again."
    );

    // the control is live again; the next attempt succeeds
    store
        .send(PageAction::Checkout(CheckoutAction::Submit))
        .await
        .unwrap();
    settle(&store).await;

    assert_eq!(storefront.cart_creations(), 2);
    assert!(store.state(|s| s.checkout.redirect_to.is_some()).await);
}

#[tokio::test(start_paused = true)]
async fn unknown_handle_lands_in_not_found() {
    let (store, _) = store_with(StubStorefront::new());
    store
        .send(PageAction::Load {
            handle: "missing".into(),
        })
        .await
        .unwrap();
    settle(&store).await;

    assert_eq!(store.state(|s| s.phase).await, PagePhase::NotFound);
}
