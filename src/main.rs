use summerjob_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("summerjob: {err}");
        std::process::exit(1);
    }
}
