#![no_main]

use libfuzzer_sys::fuzz_target;

use energy_signal::SpendSignal;
use energy_types::Address;

// The canonical encoding must always be valid JSON with exactly the four
// bound fields, and its hash must fit the proof field.
fuzz_target!(|input: (u64, u128, [u8; 20], [u8; 20])| {
    let (nonce, amount, tag, recipient) = input;
    let signal = SpendSignal::new(nonce, amount, Address::new(tag), Address::new(recipient));

    let canonical = signal.canonical().expect("canonical encoding never fails");
    let value: serde_json::Value = serde_json::from_str(&canonical).expect("valid json");
    let object = value.as_object().expect("json object");
    assert_eq!(object.len(), 4);
    assert_eq!(object["nonce"], nonce.to_string());
    assert_eq!(object["amount"], amount.to_string());

    let hash = signal.hash().expect("hash never fails");
    assert!(hash.fits_field());
});
