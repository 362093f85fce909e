use salad_station::app_system::{setup_tracing, StationSystem};
use salad_station::cart::{Cart, CheckoutForm};
use salad_station::config::Config;
use salad_station::domain::{system_clock, MenuItemFields, Timestamp};
use salad_station::query::Query;
use salad_station::refresh::Screen;
use salad_station::session::Session;
use std::error::Error;
use tracing::{info, Instrument};

fn dish(name: &str, category: &str, price: f64) -> MenuItemFields {
    MenuItemFields {
        name: name.to_string(),
        description: String::new(),
        price,
        category: category.to_string(),
        image_url: String::new(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();
    let config = Config::load();

    info!("Starting salad station");
    let system = StationSystem::new(&config);
    let mut session = Session::new(system.backend.clone(), &config, system_clock());

    let span = tracing::info_span!("menu_seeding");
    async {
        for item in [
            dish("Greek Salad", "salads", 8.5),
            dish("Quinoa Bowl", "bowls", 10.0),
            dish("Lemonade", "drinks", 3.0),
        ] {
            session.create_menu_item(item).await?;
        }
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;

    session.mount(Screen::CustomerOrder).await;
    session.settle().await?;
    let menu = session.store().menu_for(&Query::AvailableMenu);

    let span = tracing::info_span!("order_placement");
    let placed = async {
        let mut placed = Vec::new();
        for (customer, picks) in [("Ana", [0, 2]), ("Ravi", [1, 1])] {
            let mut cart = Cart::new();
            for pick in picks {
                if let Some(item) = menu.get(pick) {
                    cart.add(item);
                }
            }
            let form = CheckoutForm {
                name: customer.to_string(),
                phone: "555-0100".to_string(),
                notes: String::new(),
            };
            placed.push(session.place_order(cart.checkout(&form)?).await?);
        }
        Ok::<_, Box<dyn Error>>(placed)
    }
    .instrument(span)
    .await?;

    session.mount(Screen::Kitchen).await;
    session.settle().await?;
    if let Some(first) = placed.first() {
        session.advance_order(first.id).await?;
        session.settle().await?;
    }
    println!("{}", serde_json::to_string_pretty(&session.kitchen_feed(Timestamp::now()))?);

    session.mount(Screen::OrderBoard).await;
    session.settle().await?;
    println!("{}", serde_json::to_string_pretty(&session.board())?);

    session.mount(Screen::Dashboard).await;
    session.settle().await?;
    println!("{}", serde_json::to_string_pretty(&session.dashboard())?);

    drop(session);
    system.shutdown().await;

    info!("Salad station stopped");
    Ok(())
}
