// Decodes a small configuration document and prints its tree

use picotree::{Decoder, DefaultDecoder, Object, ParseError, Value, DEFAULT_MAX_KEYS};

fn print_object(object: Object<'_, '_>, indent: usize) {
    for member in object.members() {
        match member.value {
            Value::Str(s) => println!("{:indent$}{}: \"{}\"", "", member.key, s),
            Value::Int(n) => println!("{:indent$}{}: {}", "", member.key, n),
            Value::Object(inner) => {
                println!("{:indent$}{}:", "", member.key);
                print_object(inner, indent + 2);
            }
        }
    }
}

fn main() -> Result<(), ParseError> {
    env_logger::init();

    let json = r#"{
        "device": "sensor-7",
        "interval": 30,
        "network": {"ssid": "lab", "port": 8080, "retry": {"count": 3, "backoff": -1}},
        "tags": {}
    }"#;

    let mut decoder = DefaultDecoder::new();
    let tree = decoder.decode(json)?;
    println!(
        "Decoded {} members using {} of {} node slots",
        tree.root().len(),
        tree.node_count(),
        DEFAULT_MAX_KEYS
    );
    print_object(tree.root(), 0);

    if let Some(port) = tree.path(&["network", "port"]).and_then(|v| v.as_int()) {
        println!("Port: {}", port);
    }

    // Input that does not fit is rejected, never truncated
    let mut small = Decoder::<2>::new();
    match small.decode(json) {
        Err(e) => println!("Small decoder: {}", e),
        Ok(_) => println!("Small decoder unexpectedly succeeded"),
    }
    Ok(())
}
