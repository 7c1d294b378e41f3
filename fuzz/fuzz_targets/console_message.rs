#![no_main]

use libfuzzer_sys::fuzz_target;
use schema::ConsoleMessage;
use wire::Message;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = ConsoleMessage::decode_from_slice(data) else {
        return;
    };

    // Anything that decodes must re-encode within the static bound.
    let len = msg.encoded_len();
    assert!(len <= ConsoleMessage::MAX_SIZE);

    let mut buf = vec![0u8; ConsoleMessage::MAX_SIZE];
    let written = wire::encode_to_buffer(&msg, &mut buf);
    assert_eq!(written, len);

    let again = ConsoleMessage::decode_from_slice(&buf[..written]).unwrap();
    assert_eq!(again.encoded_len(), len);
});
