use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use menuqr::{
    ArtifactSink as _, BusinessVertical, CancellationToken, CardInfo, DirectorySink, EcLevel,
    ExportFormat, LogoSource, MenuQrConfig, QrComposer, Rgba8, SlugStatus, SlugValidator,
};

#[derive(Parser, Debug)]
#[command(name = "menuqr", version, about = "Branded QR codes for digital menus")]
struct Cli {
    /// JSON config file (missing file means defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a QR code and export it as PNG or SVG.
    Render(RenderArgs),
    /// Render the 600x800 printable card for a template.
    Card(CardArgs),
    /// List the template catalog.
    Templates(TemplatesArgs),
    /// Check or save a vanity slug.
    #[command(subcommand)]
    Slug(SlugCommand),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "tenant"])))]
struct TargetArgs {
    /// Absolute URL to encode.
    #[arg(long)]
    url: Option<String>,

    /// Tenant id; encodes the tenant's stable share URL.
    #[arg(long)]
    tenant: Option<String>,
}

impl TargetArgs {
    fn resolve(&self, cfg: &MenuQrConfig) -> String {
        match (&self.url, &self.tenant) {
            (Some(url), _) => url.clone(),
            (None, Some(tenant)) => cfg.share_identity(tenant).qr_target().to_owned(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Business name used for the file name.
    #[arg(long)]
    name: Option<String>,

    /// Edge length in pixels (150-400).
    #[arg(long)]
    size: Option<u32>,

    /// Error correction level.
    #[arg(long, value_enum)]
    level: Option<LevelChoice>,

    /// Dark module color (#RGB, #RRGGBB or #RRGGBBAA).
    #[arg(long, value_parser = parse_color)]
    fg: Option<Rgba8>,

    /// Light module color.
    #[arg(long, value_parser = parse_color)]
    bg: Option<Rgba8>,

    /// Quiet zone in modules (0-10).
    #[arg(long)]
    margin: Option<u32>,

    /// Drop the quiet zone entirely.
    #[arg(long)]
    no_margin: bool,

    /// Logo image path or http(s) URL.
    #[arg(long)]
    logo: Option<String>,

    /// Logo edge length in pixels; clamped to what fits.
    #[arg(long)]
    logo_size: Option<u32>,

    /// Apply a template's colors first.
    #[arg(long)]
    template: Option<String>,

    /// Output directory (defaults to the configured one).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CardArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Template id.
    #[arg(long)]
    template: String,

    /// Business name for the header and file name.
    #[arg(long)]
    name: Option<String>,

    /// Caption under the code (defaults to the template's vertical).
    #[arg(long)]
    caption: Option<String>,

    /// Contact phone.
    #[arg(long)]
    phone: Option<String>,

    /// Contact email.
    #[arg(long)]
    email: Option<String>,

    /// Street address.
    #[arg(long)]
    address: Option<String>,

    /// Output directory (defaults to the configured one).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TemplatesArgs {
    /// Only templates for this vertical (id or free-form category).
    #[arg(long)]
    vertical: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum SlugCommand {
    /// Check whether a slug is well formed and free.
    Check {
        /// Slug to check.
        slug: String,
        /// Tenant id the check is scoped to.
        #[arg(long)]
        tenant: String,
        /// The tenant's current slug, if any.
        #[arg(long)]
        current: Option<String>,
    },
    /// Save a slug; omit it to remove the tenant's vanity link.
    Save {
        /// Slug to save.
        slug: Option<String>,
        /// Tenant id.
        #[arg(long)]
        tenant: String,
        /// The tenant's current slug, if any.
        #[arg(long)]
        current: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Svg,
}

impl From<FormatChoice> for ExportFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => ExportFormat::Png,
            FormatChoice::Svg => ExportFormat::Svg,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelChoice {
    L,
    M,
    Q,
    H,
}

impl From<LevelChoice> for EcLevel {
    fn from(value: LevelChoice) -> Self {
        match value {
            LevelChoice::L => EcLevel::L,
            LevelChoice::M => EcLevel::M,
            LevelChoice::Q => EcLevel::Q,
            LevelChoice::H => EcLevel::H,
        }
    }
}

fn parse_color(s: &str) -> Result<Rgba8, String> {
    s.parse::<Rgba8>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = MenuQrConfig::load(cli.config.as_deref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(&cfg, args).await,
        Command::Card(args) => cmd_card(&cfg, args).await,
        Command::Templates(args) => cmd_templates(args),
        Command::Slug(cmd) => cmd_slug(&cfg, cmd).await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "menuqr=debug" } else { "menuqr=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Token cancelled on Ctrl-C so an in-flight logo fetch is abandoned.
fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}

fn http_client(cfg: &MenuQrConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(cfg.request_timeout())
        .build()
        .context("build HTTP client")
}

fn out_dir<'a>(cfg: &'a MenuQrConfig, arg: Option<&'a Path>) -> &'a Path {
    arg.unwrap_or(&cfg.output_dir)
}

async fn cmd_render(cfg: &MenuQrConfig, args: RenderArgs) -> anyhow::Result<()> {
    let mut composer = QrComposer::with_client(cfg.defaults.clone(), http_client(cfg)?);

    if let Some(id) = args.template.as_deref() {
        composer.apply_template(id)?;
    }

    let custom = composer.customization_mut();
    custom.target_url = args.target.resolve(cfg);
    if let Some(size) = args.size {
        custom.size = size;
    }
    if let Some(level) = args.level {
        custom.error_correction_level = level.into();
    }
    if let Some(fg) = args.fg {
        custom.foreground_color = fg;
    }
    if let Some(bg) = args.bg {
        custom.background_color = bg;
    }
    if let Some(margin) = args.margin {
        custom.margin_modules = margin;
    }
    if args.no_margin {
        custom.include_margin = false;
    }
    if let Some(logo) = args.logo.as_deref() {
        custom.logo.enabled = true;
        custom.logo.source = Some(LogoSource::parse(logo));
    }
    if let Some(px) = args.logo_size {
        custom.logo.size_px = px;
    }
    if custom.logo.enabled && custom.clamp_logo() {
        tracing::warn!(size_px = custom.logo.size_px, "logo size clamped to fit the code");
    }

    let outcome = composer.compose(&ctrl_c_token()).await?;
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    let mut sink = DirectorySink::new(out_dir(cfg, args.out_dir.as_deref()));
    let path = composer.export(args.format.into(), args.name.as_deref(), &mut sink)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

async fn cmd_card(cfg: &MenuQrConfig, args: CardArgs) -> anyhow::Result<()> {
    let mut composer = QrComposer::with_client(cfg.defaults.clone(), http_client(cfg)?);
    composer.customization_mut().target_url = args.target.resolve(cfg);
    composer.apply_template(&args.template)?;
    composer.compose(&ctrl_c_token()).await?;

    let info = CardInfo {
        business_name: args.name,
        caption: args.caption,
        phone: args.phone,
        email: args.email,
        address: args.address,
    };
    let artifact = composer.download_card(&info)?;

    let mut sink = DirectorySink::new(out_dir(cfg, args.out_dir.as_deref()));
    let path = sink.write(&artifact)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let vertical = args.vertical.as_deref().map(|v| {
        v.parse::<BusinessVertical>()
            .unwrap_or_else(|_| BusinessVertical::from_category(v))
    });
    let templates: Vec<_> = match vertical {
        Some(v) => menuqr::for_vertical(v).collect(),
        None => menuqr::catalog().iter().collect(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&templates).context("serialize templates")?
        );
        return Ok(());
    }
    for t in templates {
        println!(
            "{:<14} {:<14} {} on {}  {:<12} {}",
            t.id, t.name, t.colors.foreground, t.colors.background, t.vertical, t.description
        );
    }
    Ok(())
}

async fn cmd_slug(cfg: &MenuQrConfig, cmd: SlugCommand) -> anyhow::Result<()> {
    let backend = cfg.share_backend()?;
    match cmd {
        SlugCommand::Check {
            slug,
            tenant,
            current,
        } => {
            let mut v = SlugValidator::new(backend, tenant, current);
            let status = v.check(&slug).await.clone();
            println!("{status}");
            if let SlugStatus::Error(msg) = status {
                anyhow::bail!("availability check failed: {msg}");
            }
            Ok(())
        }
        SlugCommand::Save {
            slug,
            tenant,
            current,
        } => {
            let identity = cfg.share_identity(&tenant);
            let mut v = SlugValidator::new(backend, tenant, current);
            let status = v.check(slug.as_deref().unwrap_or_default()).await.clone();
            if let SlugStatus::Error(msg) = status {
                anyhow::bail!("availability check failed: {msg}");
            }
            let saved = v.save().await?;
            println!("{}", identity.with_custom_slug(saved.as_deref()).share_link());
            Ok(())
        }
    }
}
