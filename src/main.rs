use log::{debug, error};
use std::env;
use std::error::Error;

use recipe_capture::{
    decode_recipe, ImagePayload, IngredientScaler, PageContent, RecipeExtractor, ServiceConfig,
};

const USAGE: &str = "\
Usage:
  recipe-capture page <file.html>
  recipe-capture image <file>
  recipe-capture decode <file.json>
  recipe-capture scale <factor> <file.json>";

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let command = args.first().ok_or(USAGE)?;

    match command.as_str() {
        "page" => {
            let path = args.get(1).ok_or(USAGE)?;
            let html = tokio::fs::read_to_string(path).await?;
            let page = PageContent::from_html(&html);
            debug!("{:#?}", page);

            let config = ServiceConfig::load()?;
            let extractor = RecipeExtractor::from_config(&config)?;
            let recipe = extractor.extract_page_with_deadline(page).await?;
            print!("{}", recipe.to_plain_text());
        }
        "image" => {
            let path = args.get(1).ok_or(USAGE)?;
            let image = ImagePayload::new(tokio::fs::read(path).await?);

            let config = ServiceConfig::load()?;
            let extractor = RecipeExtractor::from_config(&config)?;
            let recipe = extractor.extract_image_with_deadline(image).await?;
            print!("{}", recipe.to_plain_text());
        }
        "decode" => {
            let path = args.get(1).ok_or(USAGE)?;
            let json = tokio::fs::read(path).await?;
            let recipe = decode_recipe(&json)?;
            debug!("{:#?}", recipe);
            print!("{}", recipe.to_plain_text());
        }
        "scale" => {
            let factor: f64 = args.get(1).ok_or(USAGE)?.parse()?;
            let path = args.get(2).ok_or(USAGE)?;
            let recipe = decode_recipe(&tokio::fs::read(path).await?)?;

            let config = ServiceConfig::load()?;
            let scaler = IngredientScaler::from_config(&config)?;
            for line in scaler.scale(&recipe.ingredient_lines(), factor).await? {
                println!("{line}");
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
