use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::TestEnv;

#[test]
fn test_init_creates_database() {
    let env = TestEnv::new("init_creates_database");

    env.sv()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&env.db).exists());
}

#[test]
fn test_add_complete_report() {
    let env = TestEnv::new("add_complete_report");
    env.init();
    let photo = env.photo("shop", 1600, 900);

    env.sv()
        .args([
            "add",
            "--sr",
            "Raju Das",
            "--store",
            "Sen Stores / Mr. Sen",
            "--visit-type",
            "re",
            "--category",
            "horeca",
            "--phone",
            "+91 98300-12345",
            "--lead",
            "warm",
            "--follow-up",
            "2026-12-01",
            "--product",
            "zippo-lighters",
            "--product",
            "cigarette",
            "--order-details",
            "2 cartons",
            "--photo",
            &photo,
            "--lat",
            "22.5726",
            "--lon",
            "88.3639",
        ])
        .assert()
        .success()
        .stdout(contains("Report saved with ID: 1"));

    env.sv()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(contains("RAJU DAS"))
        .stdout(contains("RE VISIT"))
        .stdout(contains("HoReCa"))
        .stdout(contains("WARM"))
        .stdout(contains("2026-12-01"))
        .stdout(contains("CIGARETTE, ZIPPO LIGHTERS"))
        .stdout(contains("2 cartons"))
        .stdout(contains("https://www.google.com/maps?q=22.5726,88.3639"));
}

#[test]
fn test_add_reports_every_problem() {
    let env = TestEnv::new("add_reports_every_problem");
    env.init();

    env.sv()
        .args(["add", "--sr", "RAJU DAS"])
        .assert()
        .failure()
        .stderr(contains("Report not saved (5 problem(s))"))
        .stderr(contains("Store Name is required."))
        .stderr(contains("Phone Number is required."))
        .stderr(contains("Photograph is required."))
        .stderr(contains("Select at least one Product."))
        .stderr(contains("You said YES to location, but none is recorded."));

    env.sv()
        .args(["list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No store visits"));
}

#[test]
fn test_add_rejects_unknown_salesperson_and_bad_phone() {
    let env = TestEnv::new("add_unknown_salesperson");
    env.init();
    let photo = env.photo("shop", 40, 30);

    env.sv()
        .args([
            "add",
            "--sr",
            "Someone Else",
            "--store",
            "Kiosk",
            "--phone",
            "call me",
            "--product",
            "none",
            "--photo",
            &photo,
            "--location-recorded",
            "no",
        ])
        .assert()
        .failure()
        .stderr(contains("Phone Number is not valid."))
        .stderr(contains("Unknown salesperson 'Someone Else'"))
        .stderr(contains("Store Name is required.").not());
}

#[test]
fn test_add_without_location_when_answer_is_no() {
    let env = TestEnv::new("add_answer_no");
    env.init();
    let photo = env.photo("shop", 40, 30);

    env.sv()
        .args([
            "add",
            "--store",
            "Corner Shop",
            "--phone",
            "033 2222 1111",
            "--product",
            "cigars",
            "--photo",
            &photo,
            "--location-recorded",
            "no",
        ])
        .assert()
        .success()
        .stdout(contains("Report saved with ID: 1"));

    // first configured salesperson, no coordinates, follow-up = visit day
    env.sv()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(contains("SHUBRAM KAR"))
        .stdout(contains("NO"))
        .stdout(contains("maps?q=").not());
}

#[test]
fn test_add_rejects_unsupported_photo() {
    let env = TestEnv::new("add_bad_photo");
    env.init();
    let not_an_image = env.out("notes.txt");
    fs::write(&not_an_image, "hello").unwrap();

    env.sv()
        .args([
            "add",
            "--store",
            "Kiosk",
            "--phone",
            "9830012345",
            "--product",
            "hookah",
            "--photo",
            &not_an_image,
            "--location-recorded",
            "no",
        ])
        .assert()
        .failure()
        .stderr(contains("Photo error"));
}

#[test]
fn test_add_rejects_bad_follow_up_date() {
    let env = TestEnv::new("add_bad_follow_up");
    env.init();

    env.sv()
        .args(["add", "--follow-up", "01/12/2026"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_show_photo_out_writes_jpeg() {
    let env = TestEnv::new("show_photo_out");
    env.init();
    env.add_visit("Sen Stores", "hot");

    let out = env.out("photo.jpg");
    env.sv()
        .args(["show", "1", "--photo-out", &out])
        .assert()
        .success()
        .stdout(contains("Photo written to"));

    let bytes = fs::read(&out).expect("read decoded photo");
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_show_unknown_id_fails() {
    let env = TestEnv::new("show_unknown_id");
    env.init();

    env.sv()
        .args(["show", "99"])
        .assert()
        .failure()
        .stderr(contains("Store visit #99 not found"));
}

#[test]
fn test_add_without_init_creates_tables() {
    let env = TestEnv::new("add_without_init");
    let photo = env.photo("shop", 40, 30);

    env.sv()
        .args([
            "add",
            "--store",
            "Kiosk",
            "--phone",
            "9830012345",
            "--product",
            "cigars",
            "--photo",
            &photo,
            "--location-recorded",
            "no",
        ])
        .assert()
        .success()
        .stdout(contains("Report saved with ID: 1"));

    env.sv()
        .args(["list", "--today"])
        .assert()
        .success()
        .stdout(contains("Kiosk"));
}
