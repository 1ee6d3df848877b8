#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Isolated environment for one test: its own HOME (config dir and
/// location session live there) and its own database.
pub struct TestEnv {
    pub home: String,
    pub db: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let mut home: PathBuf = env::temp_dir();
        home.push(format!("storevisit_{}_home", name));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create test home");

        let db = home.join("visits.sqlite");

        Self {
            home: home.to_string_lossy().to_string(),
            db: db.to_string_lossy().to_string(),
        }
    }

    /// A `storevisit` command already pointed at this env's HOME and database.
    pub fn sv(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("storevisit");
        cmd.env("HOME", &self.home)
            .env("APPDATA", &self.home)
            .env_remove("STOREVISIT_DB")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .args(["--db", &self.db]);
        cmd
    }

    /// `init` in test mode (no config file written).
    pub fn init(&self) -> &Self {
        self.sv().args(["--test", "init"]).assert().success();
        self
    }

    /// Write a small PNG to use as the store photograph.
    pub fn photo(&self, name: &str, w: u32, h: u32) -> String {
        let path = PathBuf::from(&self.home).join(format!("{}.png", name));
        image::RgbImage::from_pixel(w, h, image::Rgb([180, 40, 40]))
            .save(&path)
            .expect("write test photo");
        path.to_string_lossy().to_string()
    }

    /// Path inside the test home, removed if it already exists.
    pub fn out(&self, file: &str) -> String {
        let path = PathBuf::from(&self.home).join(file);
        fs::remove_file(&path).ok();
        path.to_string_lossy().to_string()
    }

    /// Submit a complete report with explicit GPS coordinates.
    pub fn add_visit(&self, store: &str, lead: &str) {
        let photo = self.photo(&format!("photo_{}", store.replace(' ', "_")), 64, 48);
        self.sv()
            .args([
                "add",
                "--sr",
                "raju das",
                "--store",
                store,
                "--phone",
                "9830012345",
                "--lead",
                lead,
                "--product",
                "cigarette,hookah",
                "--photo",
                &photo,
                "--lat",
                "22.5726",
                "--lon",
                "88.3639",
            ])
            .assert()
            .success();
    }
}

impl TestEnv {
    /// Write a configuration file into this env's config directory.
    pub fn write_config(&self, yaml: &str) {
        let dir = PathBuf::from(&self.home).join(".storevisit");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("storevisit.conf"), yaml).expect("write config");
    }
}

/// An HTTP URL on a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/json", addr)
}
