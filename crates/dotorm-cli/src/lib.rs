mod cli;
mod config;

use dotorm::{FieldType, Kwargs, StatementKind};

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Check(args) => check(args),
        cli::Command::Statement(args) => statement(args),
    }
}

fn check(args: cli::CheckArgs) -> anyhow::Result<()> {
    let config = config::SchemaConfig::load(args.schema)?;
    let registry = config.registry()?;

    println!(
        "{}: {} entities",
        config.schema_path.display(),
        registry.len()
    );
    for def in registry.entities() {
        let fields: Vec<String> = def
            .fields()
            .iter()
            .map(|f| match &f.ty {
                FieldType::Scalar(ty) => format!("{}: {ty}", f.name),
                FieldType::Entity(target) => format!("{} -> {target}", f.name),
            })
            .collect();
        println!("  {}({})", def.name(), fields.join(", "));
    }
    Ok(())
}

fn statement(args: cli::StatementArgs) -> anyhow::Result<()> {
    let config = config::SchemaConfig::load(args.schema)?;
    let registry = config.registry()?;
    tracing::info!(
        schema = %config.schema_path.display(),
        entities = registry.len(),
        "schema loaded"
    );

    let model = registry.model(&args.entity)?;
    let kwargs: Kwargs = args.kwargs.into_iter().collect();

    let sql = match args.kind {
        StatementKind::Select => model.select(args.columns.as_slice(), &kwargs)?,
        StatementKind::Insert => model.insert(&kwargs)?,
        StatementKind::Update => model.update(&kwargs)?,
        StatementKind::Delete => model.delete(&kwargs)?,
    };

    println!("{sql}");
    if args.with_params {
        println!("{}", serde_json::to_string(&kwargs)?);
    }
    Ok(())
}
