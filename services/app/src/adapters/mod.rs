pub mod firebase_auth;
pub mod firestore;
pub mod http;
pub mod memory;
pub mod navigation;
pub mod toast;

pub use firebase_auth::FirebaseAuthAdapter;
pub use firestore::FirestoreAdapter;
pub use memory::{InMemoryIdentity, InMemoryStore};
pub use navigation::BackStackNavigator;
pub use toast::ToastQueue;
