use epc_qr_config::Config;
use epc_qr_image::{render_png, RenderOptions};
use epc_qr_payload::{EpcPayload, PaymentRequest};
use epc_qr_types::describe_purpose;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["--example", path] => write_example(path),
        [request] => generate(request, None),
        [request, output] => generate(request, Some(output.to_string())),
        _ => {
            eprintln!("usage: epc-qr <request.toml> [output.png]");
            eprintln!("       epc-qr --example <request.toml>");
            std::process::exit(2);
        }
    }
}

/// Write a filled-in request file to start from.
fn write_example(path: &str) {
    let example = PaymentRequest {
        beneficiary_name: "John Doe".to_string(),
        beneficiary_iban: "BE68539007547034".to_string(),
        bic: Some("GKCCBEBB".to_string()),
        amount: Some(123.45),
        purpose_code: Some("COMC".to_string()),
        remittance_info: Some("Invoice 2024-001".to_string()),
        structured_reference: None,
    };
    let toml = toml::to_string(&example).expect("Could not serialize example request");
    if let Err(e) = std::fs::write(path, toml) {
        eprintln!("Could not write {path}: {e}");
        std::process::exit(1);
    }
    println!("Wrote example request to {path}");
}

fn generate(request_path: &str, output: Option<String>) {
    let config = Config::load_from_file();
    for problem in config.config_errors() {
        eprintln!("config: {problem}");
    }

    let request_toml = match std::fs::read_to_string(request_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Could not read {request_path}: {e}");
            std::process::exit(1);
        }
    };
    let request: PaymentRequest = match toml::from_str(&request_toml) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Could not parse {request_path}: {e}");
            std::process::exit(1);
        }
    };

    let payment = match request.validate(config.validation().text_overflow) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let payload = match EpcPayload::build(&payment) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let png = match render_png(&payload, &RenderOptions::from_config(&config)) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let output = output.unwrap_or_else(|| {
        format!(
            "epc_qr_{}.png",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        )
    });
    if let Err(e) = std::fs::write(&output, &png) {
        eprintln!("Could not write {output}: {e}");
        std::process::exit(1);
    }

    println!("Beneficiary: {}", payment.beneficiary_name());
    println!("IBAN:        {}", payment.beneficiary_iban());
    if let Some(bic) = payment.bic() {
        println!("BIC:         {bic}");
    }
    match payment.amount() {
        Some(amount) => println!("Amount:      EUR {}", amount.payload_string()),
        None => println!("Amount:      variable"),
    }
    if let Some(code) = payment.purpose_code() {
        match describe_purpose(code) {
            Some(description) => println!("Purpose:     {code} - {description}"),
            None => println!("Purpose:     {code}"),
        }
    }
    if let Some(reference) = payment.remittance_info() {
        println!("Reference:   {reference}");
    }
    if let Some(reference) = payment.structured_reference() {
        println!("Structured:  {reference}");
    }
    println!();
    println!("{}", payload.text());
    println!();
    println!("Saved QR code to {output}");
}
