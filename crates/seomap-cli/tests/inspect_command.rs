#![allow(clippy::unwrap_used)]

mod common;

use common::Shop;
use predicates::prelude::*;

#[test]
fn inspect_generated_leaf_and_index() {
    let shop = Shop::new("");
    shop.cmd().args(["sitemap", "--store", "1"]).assert().success();

    shop.cmd()
        .arg("inspect")
        .arg(shop.public_dir().join("default-sitemap-products.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("urlset: 2 URL(s)"))
        .stdout(predicate::str::contains("images: 1, videos: 0, alternates: 0"))
        .stdout(predicate::str::contains("https://shop.test/hat.html"));

    let output = shop
        .cmd()
        .arg("inspect")
        .arg(shop.public_dir().join("default-sitemap.xml"))
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["kind"], "sitemapindex");
    assert_eq!(value["count"], 3);
    assert_eq!(
        value["sitemaps"][0]["location"],
        "https://shop.test/default-sitemap-products.xml"
    );
}

#[test]
fn inspect_missing_file_exits_not_found() {
    let shop = Shop::new("");

    shop.cmd()
        .arg("inspect")
        .arg(shop.public_dir().join("absent.xml"))
        .assert()
        .code(3);
}

#[test]
fn inspect_malformed_file_is_a_usage_error() {
    let shop = Shop::new("");
    std::fs::create_dir_all(shop.public_dir()).unwrap();
    std::fs::write(shop.public_dir().join("bad.xml"), "<html><body/></html>").unwrap();

    shop.cmd()
        .arg("inspect")
        .arg(shop.public_dir().join("bad.xml"))
        .assert()
        .code(2);
}
