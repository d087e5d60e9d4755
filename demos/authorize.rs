//! Walks through the authorization-code flow against the production API.
//!
//! Run once without arguments to print the URL to visit. After approving access, run again with
//! the `code` and `state` query parameters from the redirect:
//!
//! ```sh
//! PINTEREST_CLIENT_ID=... PINTEREST_CLIENT_SECRET=... \
//! 	cargo run --example authorize -- <code> <state>
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use url::Url;
// self
use pinterest_client::{
	auth::{Scope, ScopeList},
	client::ReqwestPinterest,
	transport::RequestParams,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id =
		env::var("PINTEREST_CLIENT_ID").map_err(|_| eyre!("PINTEREST_CLIENT_ID is not set"))?;
	let client_secret = env::var("PINTEREST_CLIENT_SECRET")
		.map_err(|_| eyre!("PINTEREST_CLIENT_SECRET is not set"))?;
	let redirect_uri = Url::parse("https://localhost/pinterest/callback")?;
	let client = ReqwestPinterest::new(client_id, client_secret)?;
	let mut args = env::args().skip(1);
	let (Some(code), Some(state)) = (args.next(), args.next()) else {
		let scopes = ScopeList::from([Scope::ReadPublic, Scope::WritePublic]);

		println!("Visit {}.", client.auth().authorization_url(&redirect_uri, &scopes)?);
		println!("Then rerun with the returned code and state {}.", client.auth().state());

		return Ok(());
	};

	// A fresh process has a fresh state; restore the one embedded in the URL.
	client.auth().set_state(state);

	let token = client.auth().exchange_code(&code, &redirect_uri).await?;

	println!("Granted scopes: {}.", token.scope.join(", "));

	let me = client.users().get_me(RequestParams::new()).await?;

	println!("Authorized as {me}.");
	println!("{} of {} calls remaining.", client.rate_limit_remaining(), client.rate_limit());

	Ok(())
}
