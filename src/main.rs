// Pairwise class discrimination driver.
//
//   perceptron-nn <train.txt> <test.txt> [classes] [max_itr]
//
// Each file holds whitespace-delimited rows: features, then a 1-based class
// label in the last column. For every class pair (i < j) a fresh model is
// trained online on the pair's training rows and scored on both splits.
// Set RUST_LOG=info (or debug) for training progress.

use log::error;

use perceptron_nn::data::text::{append_bias, binary_targets, load_whitespace, split_by_class, stack_rows};
use perceptron_nn::{Matrix, MlpConfig, MultilayerPerceptron, Result};

const DEFAULT_CLASSES: usize = 5;
const DEFAULT_MAX_ITR: usize = 100;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <train.txt> <test.txt> [classes] [max_itr]", program_name(&args));
        std::process::exit(2);
    }

    let classes = parse_arg(&args, 3, DEFAULT_CLASSES);
    let max_itr = parse_arg(&args, 4, DEFAULT_MAX_ITR);

    if let Err(e) = run(&args[1], &args[2], classes, max_itr) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("perceptron-nn", String::as_str)
}

fn parse_arg(args: &[String], idx: usize, default: usize) -> usize {
    match args.get(idx) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("argument {idx} must be a non-negative integer, got '{raw}'");
            std::process::exit(2);
        }),
    }
}

fn run(train_path: &str, test_path: &str, classes: usize, max_itr: usize) -> Result<()> {
    let labels: Vec<f64> = (1..=classes).map(|c| c as f64).collect();
    let train_sets = load_split(train_path, &labels)?;
    let test_sets = load_split(test_path, &labels)?;

    for i in 0..classes {
        for j in (i + 1)..classes {
            let (x_train, t_train) = pair(&train_sets[i], &train_sets[j])?;
            let (x_test, t_test) = pair(&test_sets[i], &test_sets[j])?;
            if x_train.rows == 0 {
                println!("classes {} vs {}: no training rows, skipped", i + 1, j + 1);
                continue;
            }

            let mut mlp = MultilayerPerceptron::new(MlpConfig::default().with_max_itr(max_itr))?;
            mlp.fit_online(&x_train, &t_train)?;

            println!("------------------");
            println!("classes {} vs {}", i + 1, j + 1);
            println!(
                "train: score {:.4}  mean |Y-T| {:.4}",
                mlp.score(&x_train, &t_train)?.mean(),
                mlp.mean_absolute_error(&x_train, &t_train)?
            );
            if x_test.rows > 0 {
                println!(
                    "test:  score {:.4}  mean |Y-T| {:.4}",
                    mlp.score(&x_test, &t_test)?.mean(),
                    mlp.mean_absolute_error(&x_test, &t_test)?
                );
            }
        }
    }
    Ok(())
}

/// Per-class feature matrices with a bias column appended.
fn load_split(path: &str, labels: &[f64]) -> Result<Vec<Matrix>> {
    let data = load_whitespace(path)?;
    let label_col = data.cols.saturating_sub(1);
    let groups = split_by_class(&data, label_col, labels)?;
    Ok(groups.iter().map(append_bias).collect())
}

/// Stacks two classes into a feature matrix and a 0/1 target column.
fn pair(zeros: &Matrix, ones: &Matrix) -> Result<(Matrix, Matrix)> {
    let x = stack_rows(zeros, ones)?;
    let t = binary_targets(zeros.rows, ones.rows);
    Ok((x, t))
}
