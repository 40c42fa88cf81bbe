use std::{env, fs, process};

use casgraph::{
    CasGraphError, GeomVertex, Graph, VertexCategory,
    cli::CommandLineConfig,
    script::{apply_script, parse_script},
};
use tracing::{Level, info};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let graph = match load_graph(&config) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&graph, &config.command) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn load_graph(config: &CommandLineConfig) -> Result<Graph<GeomVertex>, String> {
    let mut graph: Graph<GeomVertex> = Graph::new();
    graph.subscribe(|g, event| {
        info!(event = event.kind(), size = g.size(), "graph changed");
    });
    let Some(path) = &config.script else {
        return Ok(graph);
    };
    let input = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let ops = parse_script(&input).map_err(|e| e.to_string())?;
    let stats = apply_script(&mut graph, &ops).map_err(|e| e.to_string())?;
    info!(?stats, "script replayed");
    Ok(graph)
}

fn run_command(graph: &Graph<GeomVertex>, command: &str) -> Result<(), CasGraphError> {
    match command {
        "status" => {
            print_status(graph);
            Ok(())
        }
        "list" => {
            for vertex in graph.vertices() {
                println!("{}:{}", vertex.id, category_name(vertex));
            }
            Ok(())
        }
        "adjacency" => {
            for vertex in graph.vertices() {
                println!(
                    "{} out=[{}] in=[{}]",
                    vertex.id,
                    graph.outgoing_vertices_of(&vertex.id).join(","),
                    graph.incoming_vertices_of(&vertex.id).join(",")
                );
            }
            Ok(())
        }
        "edges" => {
            for (from, to) in graph.edges() {
                println!("{from}->{to}");
            }
            Ok(())
        }
        "check" => {
            let report = graph.safety_report();
            let json = serde_json::to_string(&report)
                .map_err(|e| CasGraphError::script(e.to_string()))?;
            println!("{json}");
            if report.has_issues() {
                return Err(CasGraphError::invalid_input("structural violations detected"));
            }
            Ok(())
        }
        "snapshot" => {
            let json = serde_json::to_string_pretty(&graph.snapshot())
                .map_err(|e| CasGraphError::script(e.to_string()))?;
            println!("{json}");
            Ok(())
        }
        other => Err(CasGraphError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn print_status(graph: &Graph<GeomVertex>) {
    println!("vertices={} edges={}", graph.size(), graph.edge_count());
}

fn category_name(vertex: &GeomVertex) -> &'static str {
    match vertex.category {
        VertexCategory::Geometry => "geometry",
        VertexCategory::Variable => "variable",
    }
}
