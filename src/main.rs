use best_recipe::{find_recipes, Ingredient, RecipeError, UserPreferences, UserRequest};
use log::debug;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: best-recipe [--meal-type <type>] <ingredient[=quantity]>...";

/// `tomato=2 pieces` -> ingredient "tomato" with quantity "2 pieces"
fn parse_ingredient(arg: &str) -> Ingredient {
    match arg.split_once('=') {
        Some((name, quantity)) => Ingredient::new(name.trim()).with_quantity(quantity),
        None => Ingredient::new(arg.trim()),
    }
}

fn parse_args(args: &[String]) -> Result<UserRequest, String> {
    let mut ingredients = Vec::new();
    let mut meal_type = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--meal-type" => {
                let value = iter.next().ok_or("--meal-type needs a value")?;
                meal_type = Some(value.clone());
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => ingredients.push(parse_ingredient(arg)),
        }
    }

    if ingredients.is_empty() {
        return Err(USAGE.to_string());
    }

    let mut request = UserRequest::new(ingredients);
    if meal_type.is_some() {
        request = request.with_preferences(UserPreferences {
            meal_type,
            ..Default::default()
        });
    }
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let request = match parse_args(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{}", message);
            return Ok(ExitCode::from(2));
        }
    };
    debug!("{:#?}", request);

    match find_recipes(request).await {
        Ok(search) => {
            println!("{}", serde_json::to_string_pretty(&search)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(RecipeError::Validation(e)) => {
            eprintln!("{}: {}", e.code(), e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
