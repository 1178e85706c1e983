use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use folio::{
    api::ApiClient,
    config::Config,
    draft::{AuthoringSession, Engine, ImageAttachment, PostDraft, Taxonomy},
    seo::SeoSettings,
};

const USAGE: &str = "usage: folio <draft.json> [taxonomy.json]\n       folio submit <draft.json> [post-id] [--image <path>]";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();

    match args.as_slice() {
        [command, draft, rest @ ..] if command == "submit" => {
            let (post_id, image) = submit_options(rest)?;
            submit(&config, Path::new(draft), post_id, image.as_deref()).await
        }
        [draft] => preview(&config, Path::new(draft), None),
        [draft, taxonomy] => preview(&config, Path::new(draft), Some(Path::new(taxonomy))),
        _ => bail!(USAGE),
    }
}

/// Run one recompute over the draft and print the payload it would submit.
fn preview(config: &Config, draft_path: &Path, taxonomy_path: Option<&Path>) -> Result<()> {
    let draft: PostDraft = read_json(draft_path)?;
    let taxonomy: Taxonomy = match taxonomy_path {
        Some(path) => read_json(path)?,
        None => Taxonomy::default(),
    };

    let engine = Engine::new(SeoSettings::from(config), taxonomy);
    let payload = engine.assemble(&draft, Utc::now());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Parse `[post-id] [--image <path>]` in either order.
fn submit_options(args: &[String]) -> Result<(Option<i64>, Option<PathBuf>)> {
    let mut post_id = None;
    let mut image = None;
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--image" => {
                let path = args.next().with_context(|| format!("--image needs a path\n{USAGE}"))?;
                image = Some(PathBuf::from(path));
            }
            id if post_id.is_none() => {
                post_id = Some(id.parse::<i64>().context("post id must be an integer")?);
            }
            other => bail!("unexpected argument {other}\n{USAGE}"),
        }
    }
    Ok((post_id, image))
}

/// Load taxonomy from the API, recompute the draft against it and send it.
async fn submit(
    config: &Config,
    draft_path: &Path,
    post_id: Option<i64>,
    image_path: Option<&Path>,
) -> Result<()> {
    let draft: PostDraft = read_json(draft_path)?;
    let attachment = image_path
        .map(|path| {
            ImageAttachment::from_path(path)
                .with_context(|| format!("reading {}", path.display()))
        })
        .transpose()?;
    let client = ApiClient::from_config(config);

    // The file is the draft; only the reference lists come from the API.
    let session = AuthoringSession::bootstrap(&client, None, SeoSettings::from(config)).await?;
    let payload = session.engine().assemble(&draft, Utc::now());

    let receipt = client
        .submit(post_id, &payload, attachment.as_ref())
        .await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
