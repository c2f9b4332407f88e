use clap::{Parser, Subcommand};

use common::crypto::{digest, encoding, encryption::{self, Cipher}};

/// Encoding, encryption and hashing helpers.
#[derive(Debug, Parser)]
#[clap(name = "toolkit")]
struct CommandLine {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Base64-encode text
    Encode { text: String },
    /// Base64-decode to text
    Decode { encoded: String },
    /// Print a fresh encryption key
    Keygen,
    /// Encrypt text into a url-safe token
    Encrypt {
        #[clap(long)]
        key: String,
        plaintext: String,
    },
    /// Decrypt a token back to text
    Decrypt {
        #[clap(long)]
        key: String,
        token: String,
    },
    /// SHA-256 hex digest of a password
    Hash { password: String },
    /// Compare a password with a stored digest
    Verify {
        #[clap(long)]
        hash: String,
        password: String,
    },
    /// Run all three utilities on fixed sample input
    Demo,
}

fn demo() -> anyhow::Result<()> {
    let text = "Hello World";
    let encoded = encoding::encode(text.as_bytes());
    let decoded = String::from_utf8(encoding::decode(&encoded)?)?;
    println!("Encoded: {encoded}");
    println!("Decoded: {decoded}");

    let key = encryption::generate_key();
    let cipher = Cipher::new(&key)?;
    let token = cipher.encrypt("Hello Encryption!".as_bytes())?;
    let decrypted = String::from_utf8(cipher.decrypt(&token)?)?;
    println!("Key: {key}");
    println!("Encrypted: {token}");
    println!("Decrypted: {decrypted}");

    let password = "my_secret_password";
    let hashed = digest::hash_password(password);
    println!("Original: {password}");
    println!("SHA-256 Hash: {hashed}");
    if digest::verify_password("my_secret_aspassword", &hashed) {
        println!("Password verified successfully!");
    } else {
        println!("Password verification failed.");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse();
    match cli.command {
        Command::Encode { text } => println!("{}", encoding::encode(text.as_bytes())),
        Command::Decode { encoded } => {
            let bytes = encoding::decode(&encoded)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Keygen => println!("{}", encryption::generate_key()),
        Command::Encrypt { key, plaintext } => {
            println!("{}", Cipher::new(&key)?.encrypt(plaintext.as_bytes())?);
        }
        Command::Decrypt { key, token } => {
            let bytes = Cipher::new(&key)?.decrypt(&token)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Hash { password } => println!("{}", digest::hash_password(&password)),
        Command::Verify { hash, password } => {
            if digest::verify_password(&password, &hash) {
                println!("Password verified successfully!");
            } else {
                println!("Password verification failed.");
                std::process::exit(1);
            }
        }
        Command::Demo => demo()?,
    }
    Ok(())
}
