// src/bin/hash_password.rs
//
// Uso: hash-password <senha>
// Imprime as linhas do .env com o hash bcrypt da senha e um SESSION_SECRET novo.

use anyhow::Context;
use uuid::Uuid;

const BCRYPT_COST: u32 = 12;

// 32 bytes aleatórios em hex
fn new_session_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn main() -> anyhow::Result<()> {
    let Some(password) = std::env::args().nth(1).filter(|p| !p.is_empty()) else {
        anyhow::bail!("uso: hash-password <senha>");
    };

    let hash = bcrypt::hash(&password, BCRYPT_COST).context("Falha ao gerar o hash bcrypt")?;

    println!("# Autenticação do administrador");
    println!("ADMIN_USERNAME=admin");
    println!("ADMIN_PASSWORD_HASH={hash}");
    println!();
    println!("# Segredo de assinatura das sessões");
    println!("SESSION_SECRET={}", new_session_secret());
    println!();
    println!("RATE_LIMIT_MAX=100");
    println!("RATE_LIMIT_WINDOW=900000");

    Ok(())
}
