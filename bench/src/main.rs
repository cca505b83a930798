mod config;
mod generators;

use std::time::Instant;

use anyhow::{Context, Result};
use graph_search_core::{neighborhood, DirectedGraph, Graph, ShortestPaths, VertexId};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{BenchConfig, Mode};
use generators::Generator;

const DEPTHS: [u32; 7] = [1, 2, 3, 5, 10, 20, 50];

#[derive(Debug, Serialize)]
struct DepthRow {
    depth: u32,
    found: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
struct PathRow {
    from: VertexId,
    to: VertexId,
    hops: Option<usize>,
    settled: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    generator: &'static str,
    vertices: usize,
    edges: usize,
    memory_bytes: usize,
    generate_ms: f64,
    neighborhood: Vec<DepthRow>,
    shortest_path: PathRow,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Some(config) = BenchConfig::from_args(std::env::args().skip(1))? else {
        config::print_usage();
        return Ok(());
    };

    let all: [(&'static str, Mode, Generator); 6] = [
        ("L-system tree", Mode::LSystem, generators::lsystem),
        ("Scale-free (edge sampling)", Mode::ScaleFree, generators::scale_free),
        ("Small-world (Watts-Strogatz)", Mode::SmallWorld, generators::small_world),
        ("Erdos-Renyi random", Mode::Random, generators::random),
        ("Barbell (clique-bridge-clique)", Mode::Barbell, generators::barbell),
        ("DLA (organic branching)", Mode::Dla, generators::dla),
    ];

    if !config.json {
        println!("graph-search-bench");
        println!("==================");
        println!();
    }

    for (name, mode, generator) in all {
        if config.mode != Mode::All && config.mode != mode {
            continue;
        }
        let report = run_benchmark(name, generator, &config)
            .with_context(|| format!("benchmark '{name}' failed"))?;
        if config.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    Ok(())
}

fn run_benchmark(name: &'static str, generator: Generator, config: &BenchConfig) -> Result<Report> {
    info!(generator = name, vertices = config.vertex_count, seed = config.seed, "generating graph");

    let t = Instant::now();
    let graph = generator(config.vertex_count, config.seed).context("graph generation")?;
    let generate_ms = ms(t);
    info!(
        generator = name,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        elapsed_ms = generate_ms,
        "graph ready"
    );

    let mut rows = Vec::new();
    for depth in DEPTHS {
        let t = Instant::now();
        let found = neighborhood(&graph, 1, depth).len();
        rows.push(DepthRow {
            depth,
            found,
            elapsed_ms: ms(t),
        });
        // everything but the start was already reached
        if found + 1 >= graph.vertex_count() {
            break;
        }
    }

    let shortest_path = unit_dijkstra(&graph);

    Ok(Report {
        generator: name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        generate_ms,
        neighborhood: rows,
        shortest_path,
    })
}

/// Dijkstra with unit weights from vertex 1 to the highest id.
fn unit_dijkstra(graph: &DirectedGraph) -> PathRow {
    let from = 1;
    let to = graph.max_vertex_id();

    let t = Instant::now();
    let mut search = ShortestPaths::with_dest(graph, from, to, |_: VertexId, _: VertexId| 1.0);
    let summary = search.set_paths();
    let elapsed_ms = ms(t);

    let hops = search
        .is_reachable(to)
        .then(|| search.path_to_dest().len() - 1);

    PathRow {
        from,
        to,
        hops,
        settled: summary.visited,
        elapsed_ms,
    }
}

fn print_report(report: &Report) {
    println!("--- {} ---", report.generator);
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.0}MB",
        report.generate_ms / 1000.0,
        report.vertices,
        report.edges,
        report.memory_bytes as f64 / 1_048_576.0
    );

    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");
    for row in &report.neighborhood {
        println!("{:>8} {:>12} {:>8.1}ms", row.depth, row.found, row.elapsed_ms);
    }
    if report
        .neighborhood
        .last()
        .is_some_and(|row| row.found + 1 >= report.vertices)
    {
        println!("{:>8} (entire graph reached)", "");
    }

    let path = &report.shortest_path;
    println!();
    match path.hops {
        Some(hops) => println!(
            "Shortest path {} -> {}: {} hops, {} settled in {:.1}ms",
            path.from, path.to, hops, path.settled, path.elapsed_ms
        ),
        None => println!(
            "Shortest path {} -> {}: no path, {} settled in {:.1}ms",
            path.from, path.to, path.settled, path.elapsed_ms
        ),
    }
    println!();
}

fn ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
