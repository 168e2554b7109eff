use common::api::Order;
use common::cli::{parse_food_id, validate_address, CLIError, DEFAULT_ADDRESS};
use common::client::Api;
use common::errors::Result;
use common::format::format_value;
use common::screen::FoodDetails;
use dialoguer::Select;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct CLIOptions {
    target: String,
    food_id: u64,
}

/// What the user can do from the details screen
#[derive(Debug, Clone, Copy)]
enum Action {
    AddExtra,
    RemoveExtra,
    OneMoreFood,
    OneLessFood,
    ToggleFavorite,
    ConfirmOrder,
    Leave,
}

/// Arguments: an optional target address, then the id of the food to show
fn parse_cli_args<I>(mut args: I) -> Result<CLIOptions>
where
    I: Iterator<Item = String>,
{
    assert!(args.next().is_some()); // Skip the program name
    let maybe_target = args
        .next()
        .ok_or(CLIError::MissingParameter("target or food id"))?;

    let (target, food_id) = match validate_address(&maybe_target) {
        Ok(target) => {
            let id = args.next().ok_or(CLIError::MissingParameter("food id"))?;
            (target.to_string(), parse_food_id(&id)?)
        }
        Err(_) => (DEFAULT_ADDRESS.to_string(), parse_food_id(&maybe_target)?),
    };

    Ok(CLIOptions { target, food_id })
}

/// Redraw the whole screen from the current state, favorite marker included
fn render(screen: &FoodDetails) {
    let favorite_marker = if screen.is_favorite() {
        " [favorite]"
    } else {
        ""
    };

    println!();
    println!("=== {}{} ===", screen.food().name, favorite_marker);
    println!("{}", screen.food().description);
    println!("Unit price: {}", screen.food().formatted_price);

    if !screen.extras().is_empty() {
        println!();
        println!("Extras:");
        for extra in screen.extras() {
            println!(
                "  {:<24} {:>10}  x{}",
                extra.name, extra.formatted_value, extra.quantity
            );
        }
    }

    println!();
    println!("Quantity: {}", screen.food_quantity());
    println!("Order total: {}", screen.formatted_total());
}

fn render_receipt(order: &Order) {
    println!();
    println!("=== Order #{} placed ===", order.id);
    println!("{} x{}", order.name, order.quantity);
    for extra in &order.extras {
        println!("  + {} x{}", extra.name, extra.quantity);
    }
    println!("Total: {}", format_value(order.total));
}

/// The actions that make sense for the current state, in display order
fn menu(screen: &FoodDetails) -> Vec<(String, Action)> {
    let mut entries = Vec::new();

    if !screen.extras().is_empty() {
        entries.push(("Add an extra".to_string(), Action::AddExtra));
        entries.push(("Remove an extra".to_string(), Action::RemoveExtra));
    }
    entries.push((
        format!("One more {}", screen.food().name),
        Action::OneMoreFood,
    ));
    entries.push((
        format!("One less {}", screen.food().name),
        Action::OneLessFood,
    ));
    entries.push((
        if screen.is_favorite() {
            "Remove from favorites".to_string()
        } else {
            "Add to favorites".to_string()
        },
        Action::ToggleFavorite,
    ));
    entries.push(("Confirm order".to_string(), Action::ConfirmOrder));
    entries.push(("Leave without ordering".to_string(), Action::Leave));

    entries
}

fn select_extra(screen: &FoodDetails) -> Result<u64> {
    let labels: Vec<String> = screen
        .extras()
        .iter()
        .map(|extra| format!("{} ({})", extra.name, extra.formatted_value))
        .collect();

    let selection = Select::new()
        .with_prompt("Which extra?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(screen.extras()[selection].id)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_cli_args(std::env::args())?;
    let api = Api::new(&options.target);

    let mut screen = match FoodDetails::load(&api, options.food_id) {
        Ok(screen) => screen,
        Err(err) => {
            // A wrong id is the common mistake, list what the backend has
            if let Ok(foods) = api.list_foods() {
                eprintln!("Known foods:");
                for food in foods {
                    eprintln!("  {:>3}  {}", food.id, food.name);
                }
            }
            return Err(err);
        }
    };

    loop {
        render(&screen);

        let entries = menu(&screen);
        let labels: Vec<&String> = entries.iter().map(|(label, _)| label).collect();
        let selection = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match entries[selection].1 {
            Action::AddExtra => {
                let extra_id = select_extra(&screen)?;
                screen.increment_extra(extra_id);
            }
            Action::RemoveExtra => {
                let extra_id = select_extra(&screen)?;
                screen.decrement_extra(extra_id);
            }
            Action::OneMoreFood => screen.increment_food(),
            Action::OneLessFood => screen.decrement_food(),
            Action::ToggleFavorite => {
                screen.toggle_favorite(&api);
            }
            Action::ConfirmOrder => match screen.finish_order(&api) {
                Ok(order) => {
                    render_receipt(&order);
                    break;
                }
                Err(_) => println!("The order did not go through, you can try again."),
            },
            Action::Leave => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        let mut all = vec!["client".to_string()];
        all.extend(list.iter().map(|s| s.to_string()));
        all.into_iter()
    }

    #[test]
    fn test_parse_cli_args_with_target() {
        let options = parse_cli_args(args(&["127.0.0.1:9000", "3"])).unwrap();
        assert_eq!(options.target, "127.0.0.1:9000");
        assert_eq!(options.food_id, 3);
    }

    #[test]
    fn test_parse_cli_args_food_id_only() {
        let options = parse_cli_args(args(&["3"])).unwrap();
        assert_eq!(options.target, DEFAULT_ADDRESS);
        assert_eq!(options.food_id, 3);
    }

    #[test]
    fn test_parse_cli_args_rejects_garbage() {
        assert!(parse_cli_args(args(&[])).is_err());
        assert!(parse_cli_args(args(&["banana"])).is_err());
        assert!(parse_cli_args(args(&["127.0.0.1:9000"])).is_err());
    }
}
