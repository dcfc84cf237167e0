use perceptron_nn::data::text::{builtin_first_input, builtin_xor};
use perceptron_nn::{MlpConfig, MultilayerPerceptron};

fn main() -> perceptron_nn::Result<()> {
    env_logger::init();

    let config = MlpConfig::default()
        .with_hidden_units(5)
        .with_max_itr(5000)
        .with_seed(42);

    for (name, (inputs, targets)) in [("first input", builtin_first_input()), ("xor", builtin_xor())] {
        let mut mlp = MultilayerPerceptron::new(config.clone())?;
        let report = mlp.fit_online(&inputs, &targets)?;
        println!("{name}: {} updates, mean error = {:.6}", report.iterations, report.final_error);

        let outputs = mlp.predict(&inputs)?;
        for (input, output) in inputs.data.iter().zip(outputs.data.iter()) {
            println!("  Input: {:?} -> Output: {:.4}", input, output[0]);
        }
        println!("  score = {:.2}", mlp.score(&inputs, &targets)?.mean());
    }

    Ok(())
}
