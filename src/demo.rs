//! Built-in sample page shown when no input file is given.
//!
//! Three showcase blocks (JavaScript, Python, HTML) plus one generated
//! Rust block large enough to exercise lazy tokenization.

use crate::source::SourceBlock;

const JAVASCRIPT_SAMPLE: &str = r##"// JavaScript Example with Enhanced Syntax Highlighting
import React, { useState, useEffect } from 'react';
import { toast } from 'sonner';

const EnhancedComponent = ({ data }) => {
  const [count, setCount] = useState(0);
  const [loading, setLoading] = useState(false);
  
  // This is a comment explaining the functionality
  useEffect(() => {
    if (data?.length > 0) {
      setCount(data.length);
      toast.success('Data loaded successfully!');
    }
  }, [data]);

  const handleClick = async () => {
    setLoading(true);
    try {
      const response = await fetch('/api/data');
      const result = await response.json();
      console.log('API Response:', result);
    } catch (error) {
      console.error('Error:', error.message);
    } finally {
      setLoading(false);
    }
  };

  return (
    <div className="container mx-auto">
      <h1>Enhanced Code Block Demo</h1>
      <button 
        onClick={handleClick}
        disabled={loading}
        className="px-4 py-2 bg-blue-500 text-white rounded"
      >
        {loading ? 'Loading...' : `Click me (${count})`}
      </button>
    </div>
  );
};

export default EnhancedComponent;"##;

const PYTHON_SAMPLE: &str = r##"# Python Example with Beautiful Syntax Highlighting
import asyncio
import json
from typing import List, Dict, Optional
from dataclasses import dataclass

@dataclass
class User:
    """Enhanced user model with validation"""
    id: int
    name: str
    email: str
    is_active: bool = True
    
    def __post_init__(self):
        if not self.email or '@' not in self.email:
            raise ValueError("Invalid email address")

class UserService:
    """Service class for user operations"""
    
    def __init__(self, database_url: str):
        self.db_url = database_url
        self.users: List[User] = []
    
    async def fetch_users(self) -> List[Dict]:
        """Fetch all users from the database"""
        # This is a comment explaining the async operation
        try:
            async with aiohttp.ClientSession() as session:
                async with session.get(f"{self.db_url}/users") as response:
                    data = await response.json()
                    return [User(**user_data) for user_data in data]
        except Exception as e:
            print(f"Error fetching users: {e}")
            return []
    
    def create_user(self, name: str, email: str) -> Optional[User]:
        """Create a new user with validation"""
        try:
            new_user = User(
                id=len(self.users) + 1,
                name=name.strip(),
                email=email.lower().strip()
            )
            self.users.append(new_user)
            return new_user
        except ValueError as e:
            print(f"Validation error: {e}")
            return None

# Usage example
if __name__ == "__main__":
    service = UserService("https://api.example.com")
    user = service.create_user("John Doe", "john@example.com")
    print(f"Created user: {user}")"##;

const HTML_SAMPLE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Enhanced Code Block Demo</title>
    <style>
        /* Enhanced CSS with modern styling */
        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            margin: 0;
            padding: 2rem;
            min-height: 100vh;
        }
        
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background: rgba(255, 255, 255, 0.95);
            border-radius: 16px;
            padding: 2rem;
            box-shadow: 0 20px 40px rgba(0, 0, 0, 0.1);
        }
        
        .code-block {
            background: #1a1a1a;
            border-radius: 12px;
            padding: 1.5rem;
            overflow-x: auto;
            border: 1px solid #333;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>🚀 Enhanced Code Blocks</h1>
        <p>This demonstrates high-quality syntax highlighting with:</p>
        <ul>
            <li>✨ Vibrant colors</li>
            <li>📋 Copy to clipboard</li>
            <li>🔄 Text wrapping toggle</li>
            <li>📏 Line counting</li>
            <li>🌓 Dark/light theme support</li>
        </ul>
        
        <div class="code-block">
            <pre><code>console.log('Hello, enhanced world!');</code></pre>
        </div>
    </div>
    
    <script>
        // Enhanced JavaScript functionality
        document.addEventListener('DOMContentLoaded', () => {
            console.log('🎉 Enhanced code blocks loaded!');
            
            const buttons = document.querySelectorAll('.copy-btn');
            buttons.forEach(btn => {
                btn.addEventListener('click', async () => {
                    try {
                        await navigator.clipboard.writeText(btn.dataset.code);
                        btn.textContent = '✅ Copied!';
                        setTimeout(() => {
                            btn.textContent = '📋 Copy';
                        }, 2000);
                    } catch (err) {
                        console.error('Failed to copy:', err);
                    }
                });
            });
        });
    </script>
</body>
</html>"##;

/// The sample blocks, in page order.
pub fn sample_blocks() -> Vec<SourceBlock> {
    vec![
        SourceBlock::new(JAVASCRIPT_SAMPLE, "javascript"),
        SourceBlock::new(PYTHON_SAMPLE, "python"),
        SourceBlock::new(HTML_SAMPLE, "html"),
        SourceBlock::new(large_rust_sample(400), "rust"),
    ]
}

/// `functions` small Rust functions, one after another.
pub fn large_rust_sample(functions: usize) -> String {
    let mut code = String::from(
        "// Generated module: scroll here to load it.\n\
         use std::collections::HashMap;\n\n",
    );
    for i in 0..functions {
        code.push_str(&format!(
            "/// Looks up entry {i}.\n\
             pub fn lookup_{i}(map: &HashMap<&'static str, u64>) -> Option<u64> {{\n\
             \x20   let key = \"entry-{i}\";\n\
             \x20   map.get(key).copied().map(|v| v * {i} + 0x{i:x})\n\
             }}\n\n"
        ));
    }
    code
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
