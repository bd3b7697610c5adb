use alcurve::prelude::*;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "alcurve-cli")]
#[command(about = "Exact queries on real plane algebraic curves")]
struct Cmd {
    /// Log cache and analysis events
    #[arg(long, global = true)]
    verbose: bool,

    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Intersection points of two curves with multiplicities
    Solve {
        #[arg(long)]
        f: String,
        #[arg(long)]
        g: String,
    },
    /// Sign of F at every intersection point of G and H
    Sign {
        #[arg(long)]
        f: String,
        #[arg(long)]
        g: String,
        #[arg(long)]
        h: String,
    },
    /// Square-free factorization
    Factor {
        #[arg(long)]
        f: String,
    },
    /// x- and y-critical points of a curve
    Critical {
        #[arg(long)]
        f: String,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct PointOut {
    x: f64,
    y: f64,
    x_interval: [String; 2],
    y_interval: [String; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    multiplicity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign: Option<i32>,
}

impl PointOut {
    fn new(p: &XyCoordinate2) -> Self {
        let (ix, iy) = (p.approximation_x(), p.approximation_y());
        let v = p.to_f64();
        Self {
            x: v.x,
            y: v.y,
            x_interval: [ix.lo.to_string(), ix.hi.to_string()],
            y_interval: [iy.lo.to_string(), iy.hi.to_string()],
            multiplicity: None,
            sign: None,
        }
    }
}

#[derive(Serialize)]
struct FactorOut {
    factor: String,
    multiplicity: usize,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let out = cmd.out.as_deref();
    let k = Kernel::new();
    match cmd.action {
        Action::Solve { f, g } => solve(&k, &f, &g, out),
        Action::Sign { f, g, h } => sign(&k, &f, &g, &h, out),
        Action::Factor { f } => factor(&k, &f, out),
        Action::Critical { f } => critical(&k, &f, out),
        Action::Report => report(),
    }
}

fn curve(k: &Kernel, flag: &str, text: &str) -> Result<CurveAnalysis> {
    k.construct_curve_from_str(text)
        .with_context(|| format!("parsing --{flag} {text:?}"))
}

fn solve(k: &Kernel, f: &str, g: &str, out: Option<&Path>) -> Result<()> {
    let (cf, cg) = (curve(k, "f", f)?, curve(k, "g", g)?);
    let pts: Vec<PointOut> = k
        .solve(&cf, &cg)?
        .iter()
        .map(|(p, m)| PointOut {
            multiplicity: Some(*m),
            ..PointOut::new(p)
        })
        .collect();
    tracing::info!(points = pts.len(), "solve");
    emit(&pts, out, "solve", json!({"f": f, "g": g}))
}

fn sign(k: &Kernel, f: &str, g: &str, h: &str, out: Option<&Path>) -> Result<()> {
    let (cf, cg, ch) = (curve(k, "f", f)?, curve(k, "g", g)?, curve(k, "h", h)?);
    let pts: Vec<PointOut> = k
        .solve(&cg, &ch)?
        .iter()
        .map(|(p, _)| PointOut {
            sign: Some(k.sign_at(&cf, p).as_i32()),
            ..PointOut::new(p)
        })
        .collect();
    tracing::info!(points = pts.len(), "sign");
    emit(&pts, out, "sign", json!({"f": f, "g": g, "h": h}))
}

fn factor(k: &Kernel, f: &str, out: Option<&Path>) -> Result<()> {
    let cf = curve(k, "f", f)?;
    let parts: Vec<FactorOut> = k
        .square_free_factorization(&cf)
        .into_iter()
        .map(|(c, m)| FactorOut {
            factor: c.polynomial().to_string(),
            multiplicity: m,
        })
        .collect();
    emit(&parts, out, "factor", json!({"f": f}))
}

fn critical(k: &Kernel, f: &str, out: Option<&Path>) -> Result<()> {
    let cf = curve(k, "f", f)?;
    let square_free = k.make_square_free(&cf);
    let points = |pts: Vec<XyCoordinate2>| pts.iter().map(PointOut::new).collect::<Vec<_>>();
    let doc = json!({
        "x_critical": points(k.x_critical_points(&square_free)),
        "y_critical": points(k.y_critical_points(&square_free)),
    });
    emit(&doc, out, "critical", json!({"f": f}))
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "alcurve_version": alcurve::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn emit<T: Serialize>(
    value: &T,
    out: Option<&Path>,
    command: &'static str,
    params: serde_json::Value,
) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let Some(path) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    let sidecar = provenance::write_sidecar(path, provenance::Payload::new(command, params))?;
    tracing::info!(out = %path.display(), provenance = %sidecar.display(), "wrote");
    Ok(())
}
