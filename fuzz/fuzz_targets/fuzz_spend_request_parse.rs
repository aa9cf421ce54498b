#![no_main]

use libfuzzer_sys::fuzz_target;

use energy_ledger::SpendRequest;

// Arbitrary bytes posted to the spend endpoint must never panic the parser,
// and anything that parses must re-encode to an equal request.
fuzz_target!(|data: &[u8]| {
    if let Ok(request) = serde_json::from_slice::<SpendRequest>(data) {
        let encoded = serde_json::to_vec(&request).expect("re-encode");
        let decoded: SpendRequest = serde_json::from_slice(&encoded).expect("re-decode");
        assert_eq!(decoded, request);
        let _ = request.signal().hash();
    }
});
